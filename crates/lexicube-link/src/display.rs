//! Outbound display commands for the cubes.
//!
//! Everything here is a pure function of resolver output and the
//! registry: the transport that actually delivers the commands is a
//! collaborator, not this crate's concern. The topic/payload encoding
//! in [`CubeCommand::encode`] is the reference transport's.

use lexicube_chain::Word;
use lexicube_registry::{CubeId, Registry, TileSlot};
use serde::{Deserialize, Serialize};

/// Border drawing glyph for one cube face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderGlyph {
    /// This slot starts a chain.
    Start,
    /// This slot ends a chain.
    End,
    /// This slot is inside a chain.
    Interior,
    /// This slot is unconnected.
    Clear,
}

impl BorderGlyph {
    /// The wire character for this glyph.
    pub const fn as_char(self) -> char {
        match self {
            Self::Start => '[',
            Self::End => ']',
            Self::Interior => '-',
            Self::Clear => ' ',
        }
    }
}

/// Scoring verdict on an announced word, as it affects cube feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// A valid, unplayed word: flash and turn the borders green.
    Valid,
    /// A valid word already played this round: yellow borders.
    AlreadyPlayed,
    /// Not a word: white borders.
    Invalid,
}

impl GuessOutcome {
    /// The wire character for this outcome's border color.
    pub const fn border_color(self) -> char {
        match self {
            Self::Valid => 'G',
            Self::AlreadyPlayed => 'Y',
            Self::Invalid => 'W',
        }
    }
}

/// One command for a single cube's display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CubeCommand {
    /// Show a letter on the cube face.
    Letter { cube: CubeId, letter: char },
    /// Draw a border segment.
    BorderLine { cube: CubeId, glyph: BorderGlyph },
    /// Recolor the border.
    BorderColor { cube: CubeId, color: char },
    /// Flash the display.
    Flash { cube: CubeId },
}

impl CubeCommand {
    /// Topic and payload in the reference transport encoding.
    pub fn encode(&self) -> (String, Option<String>) {
        match self {
            Self::Letter { cube, letter } => {
                (format!("cube/{cube}/letter"), Some(letter.to_string()))
            }
            Self::BorderLine { cube, glyph } => (
                format!("cube/{cube}/border_line"),
                Some(glyph.as_char().to_string()),
            ),
            Self::BorderColor { cube, color } => (
                format!("cube/{cube}/border_color"),
                Some(color.to_string()),
            ),
            Self::Flash { cube } => (format!("cube/{cube}/flash"), None),
        }
    }
}

/// Border glyph for every rack slot given the current candidate words.
///
/// The first slot of each word opens a border, its last closes it, and
/// slots between draw the connector; every slot outside a word clears.
/// A single-slot word just opens, matching the physical display.
pub fn border_annotations(words: &[Word], max_slots: usize) -> Vec<(TileSlot, BorderGlyph)> {
    let mut glyphs = vec![BorderGlyph::Clear; max_slots];

    for word in words {
        let slots = word.slots();
        let Some((&first, rest)) = slots.split_first() else {
            continue;
        };
        assign(&mut glyphs, first, BorderGlyph::Start);
        if let Some((&last, middle)) = rest.split_last() {
            assign(&mut glyphs, last, BorderGlyph::End);
            for &mid in middle {
                assign(&mut glyphs, mid, BorderGlyph::Interior);
            }
        }
    }

    glyphs
        .into_iter()
        .enumerate()
        .map(|(ix, glyph)| (TileSlot::new(ix as u8), glyph))
        .collect()
}

fn assign(glyphs: &mut [BorderGlyph], slot: TileSlot, glyph: BorderGlyph) {
    if let Some(entry) = glyphs.get_mut(slot.index() as usize) {
        *entry = glyph;
    }
}

/// Border commands for the whole rack, addressed to the slots' cubes.
///
/// Slots with no cube assigned are skipped.
pub fn border_commands(registry: &Registry, words: &[Word]) -> Vec<CubeCommand> {
    border_annotations(words, registry.max_slots())
        .into_iter()
        .filter_map(|(slot, glyph)| {
            registry.cube_for_slot(slot).map(|cube| CubeCommand::BorderLine {
                cube: cube.clone(),
                glyph,
            })
        })
        .collect()
}

/// Feedback commands for a scored word.
pub fn outcome_commands(registry: &Registry, word: &Word, outcome: GuessOutcome) -> Vec<CubeCommand> {
    let mut commands = Vec::new();
    for &slot in word.slots() {
        let Some(cube) = registry.cube_for_slot(slot) else {
            continue;
        };
        if outcome == GuessOutcome::Valid {
            commands.push(CubeCommand::Flash { cube: cube.clone() });
        }
        commands.push(CubeCommand::BorderColor {
            cube: cube.clone(),
            color: outcome.border_color(),
        });
    }
    commands
}

/// Letter commands for (re)loading the rack onto the cubes.
pub fn load_rack(registry: &Registry, letters: &[(TileSlot, char)]) -> Vec<CubeCommand> {
    letters
        .iter()
        .filter_map(|&(slot, letter)| {
            registry.cube_for_slot(slot).map(|cube| CubeCommand::Letter {
                cube: cube.clone(),
                letter,
            })
        })
        .collect()
}
