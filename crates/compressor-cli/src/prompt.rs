//! Interactive fallback for paths missing from the command line.
//!
//! Questions go to stderr so `--json` output on stdout stays parseable.
//! Answers are whitespace-delimited tokens; several answers may share one
//! input line.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use std::collections::VecDeque;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// One question and the name of the path it asks for.
pub struct Question {
    pub text: &'static str,
    pub what: &'static str,
}

pub const ZIP_SOURCE: Question = Question {
    text: "What file would you like to zip?",
    what: "source",
};

pub const UNZIP_SOURCE: Question = Question {
    text: "What file would you like to unzip?",
    what: "archive",
};

pub const ZIP_DESTINATION: Question = Question {
    text: "What is the destination name?",
    what: "destination",
};

pub const UNZIP_DESTINATION: Question = Question {
    text: "What is the destination name?",
    what: "output directory",
};

/// Reads answers as whitespace-delimited tokens.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Returns `given` unchanged, or asks `question` and reads the answer.
    pub fn path_or_ask(&mut self, given: Option<&Path>, question: &Question) -> Result<PathBuf> {
        match given {
            Some(path) => Ok(path.to_path_buf()),
            None => self.ask(question).map(PathBuf::from),
        }
    }

    /// Prints `question` and returns the next token of input.
    pub fn ask(&mut self, question: &Question) -> Result<String> {
        writeln!(self.writer, "{}", question.text).context("failed to write prompt")?;
        self.writer.flush().context("failed to write prompt")?;

        match self.next_token()? {
            Some(token) => Ok(token),
            None => bail!("missing {} path: no input provided", question.what),
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .context("failed to read from standard input")?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
