//! Section extraction for captured CLI sessions.
//!
//! A captured log is a sequence of command invocations, each introduced by
//! a prompt line (`hostname` + prompt delimiter + command). This module
//! isolates the output of one command, and optionally narrows it further to
//! a named block such as a single interface's stanza.

mod block;
mod command;
mod normalize;

pub use block::{LabelMatch, extract_block, extract_named_block, extract_until_next};
pub use command::{SectionQuery, anchor_hostname, extract_command_section};
pub use normalize::normalize_log;
