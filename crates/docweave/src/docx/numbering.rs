//! Numbering definitions of packaged documents.

use docx_rs::*;

use crate::det::ListType;

use super::list::MAX_LEVEL;
use super::model::NumberingDefinition;

/// Creates a list level with the specified parameters
fn list_level(id: usize, format: &str, text: &str, is_bullet: bool) -> Level {
    let indent_size = 720 * (id + 1) as i32;
    let hanging_indent = if is_bullet { 360 } else { 420 };

    Level::new(
        id,
        Start::new(1),
        NumberFormat::new(format),
        LevelText::new(text),
        LevelJc::new("left"),
    )
    .indent(
        Some(indent_size),
        Some(SpecialIndentType::Hanging(hanging_indent)),
        None,
        None,
    )
}

fn ordered_level(i: usize) -> Level {
    let level_text = format!("%{}.", i + 1);
    let number_format = match i % 3 {
        0 => "decimal",
        1 => "lowerLetter",
        _ => "lowerRoman",
    };

    let level = list_level(i, number_format, &level_text, false);
    if i > 0 {
        level.level_restart(0_u32)
    } else {
        level
    }
}

fn bullet_level(i: usize) -> Level {
    let bullet_text = match i % 3 {
        0 => "•",
        1 => "○",
        _ => "▪",
    };
    list_level(i, "bullet", bullet_text, true)
}

/// Adds one abstract numbering and one numbering instance per definition.
/// The abstract id equals the numbering id.
pub(super) fn add_numbering(mut docx: Docx, definitions: &[NumberingDefinition]) -> Docx {
    for def in definitions {
        let id = def.num_id as usize;
        let mut abstract_numbering = AbstractNumbering::new(id);
        for i in 0..=MAX_LEVEL as usize {
            let level = match def.list_type {
                ListType::Ordered => ordered_level(i),
                ListType::Unordered => bullet_level(i),
            };
            abstract_numbering = abstract_numbering.add_level(level);
        }

        docx = docx
            .add_abstract_numbering(abstract_numbering)
            .add_numbering(Numbering::new(id, id));
    }
    docx
}
