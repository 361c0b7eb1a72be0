//! Slack Block Kit translation
//!
//! Maps a `Document` to the list of display blocks the Slack API expects and
//! back. The mapping is lossless for any document `render` can produce:
//!
//! | Section             | Block                                   |
//! |---------------------|-----------------------------------------|
//! | `Banner`            | `section` with `plain_text`             |
//! | `EnvironmentHeader` | `header` with `plain_text`              |
//! | `StepEntry`         | `section` with `mrkdwn` `*step*: state` |

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Document, Section};
use crate::error::{NotifyError, NotifyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Section,
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
}

/// A single Slack layout block
///
/// Extra fields Slack adds on the way back (`block_id`, `emoji`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: TextObject,
}

impl Block {
    fn new(kind: BlockKind, text_kind: TextKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: TextObject {
                kind: text_kind,
                text: text.into(),
            },
        }
    }
}

/// Render `document` as Slack blocks.
pub fn to_blocks(document: &Document) -> Vec<Block> {
    document
        .sections()
        .iter()
        .map(|section| match section {
            Section::Banner { text } => Block::new(BlockKind::Section, TextKind::PlainText, text),
            Section::EnvironmentHeader { name } => {
                Block::new(BlockKind::Header, TextKind::PlainText, name)
            }
            Section::StepEntry { step, state } => Block::new(
                BlockKind::Section,
                TextKind::Mrkdwn,
                format_step_line(step, state),
            ),
        })
        .collect()
}

/// Parse Slack blocks back into a document.
pub fn from_blocks(blocks: &[Block]) -> NotifyResult<Document> {
    blocks
        .iter()
        .map(|block| match (block.kind, block.text.kind) {
            (BlockKind::Section, TextKind::PlainText) => Ok(Section::banner(&block.text.text)),
            (BlockKind::Header, TextKind::PlainText) => {
                Ok(Section::environment_header(&block.text.text))
            }
            (BlockKind::Section, TextKind::Mrkdwn) => parse_step_line(&block.text.text)
                .map(|(step, state)| Section::step_entry(step, state))
                .ok_or_else(|| unrecognized(block)),
            (BlockKind::Header, TextKind::Mrkdwn) => Err(unrecognized(block)),
        })
        .collect()
}

/// Plain-text fallback shown in notifications
pub fn fallback_text(document: &Document) -> String {
    document
        .banner_text()
        .map(str::to_string)
        .or_else(|| {
            document
                .step_entries()
                .next()
                .map(|(step, state)| format!("{step}: {state}"))
        })
        .unwrap_or_else(|| "Deployment status".to_string())
}

pub fn format_step_line(step: &str, state: &str) -> String {
    format!("*{step}*: {state}")
}

/// Split `*step*: state` into its parts.
pub fn parse_step_line(line: &str) -> Option<(&str, &str)> {
    let (step, state) = line.strip_prefix('*')?.split_once("*: ")?;
    if step.is_empty() {
        return None;
    }
    Some((step, state))
}

fn unrecognized(block: &Block) -> NotifyError {
    NotifyError::transport(
        "decode blocks",
        format!("unrecognized block {:?}: {:?}", block.kind, block.text.text),
    )
}
