use std::str::SplitTerminator;

use crate::{Command, Fault, Verb};

/// One inbound request: the text received by a session's single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    text: String,
}

impl Request {
    /// Decodes raw bytes, replacing invalid UTF-8 sequences.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lazily decodes the request into commands, left to right.
    pub fn commands(&self) -> Commands<'_> {
        Commands {
            tokens: self.text.split_terminator('\n'),
            done: false,
        }
    }
}

impl From<&str> for Request {
    fn from(value: &str) -> Self {
        Self {
            text: value.to_string(),
        }
    }
}

/// Iterator over the commands of a [`Request`].
///
/// Newlines terminate tokens, so the empty remnant after a final newline is
/// not a token, while every other empty token is kept. The sequence always
/// ends with [`Command::End`] or [`Command::Malformed`]; a token stream that
/// runs out first yields [`Fault::MissingEnd`].
#[derive(Debug, Clone)]
pub struct Commands<'a> {
    tokens: SplitTerminator<'a, char>,
    done: bool,
}

impl Commands<'_> {
    fn argument(&mut self) -> Option<String> {
        self.tokens.next().map(str::to_string)
    }

    fn decode(&mut self) -> Command {
        let verb = match self.tokens.next() {
            Some(token) => token.parse::<Verb>(),
            None => return Command::Malformed(Fault::MissingEnd),
        };

        match verb {
            Ok(Verb::Write) => {
                let Some(key) = self.argument() else {
                    return Command::Malformed(Fault::MissingKey(Verb::Write));
                };
                match self.argument() {
                    Some(value) => Command::Write { key, value },
                    None => Command::Malformed(Fault::MissingValue),
                }
            }
            Ok(Verb::Read) => match self.argument() {
                Some(key) => Command::Read { key },
                None => Command::Malformed(Fault::MissingKey(Verb::Read)),
            },
            Ok(Verb::Delete) => match self.argument() {
                Some(key) => Command::Delete { key },
                None => Command::Malformed(Fault::MissingKey(Verb::Delete)),
            },
            Ok(Verb::Count) => Command::Count,
            Ok(Verb::End) => Command::End,
            Err(fault) => Command::Malformed(fault),
        }
    }
}

impl Iterator for Commands<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let command = self.decode();
        self.done = command.is_terminal();
        Some(command)
    }
}

impl std::iter::FusedIterator for Commands<'_> {}
