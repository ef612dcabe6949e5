use crate::core::{AudioPlayer, Result};
use crate::utils::error::SpellerError;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const INTRODUCTION: [&str; 3] = [
    "Welcome! Throughout this test, we will try to figure out the method in which you learned to read. While some people learn to read phonetically, spelling based on the sound of each word, others learned to write by pure memorization.",
    "For each word, listen to the audio and input your best guess as to the spelling of the word. Do not worry if some of the words sound odd -- they are not all real English words!",
    "Each audio will play once before you are asked to input a guess on the spelling. If you would like to hear the audio again, simply type \"repeat\".",
];

pub const READY_PROMPT: &str = "Ready? (Y/n): ";
pub const SPELLING_PROMPT: &str = "Enter your spelling or 'repeat' to hear the one more time: ";
const REPEAT_COMMAND: &str = "repeat";

/// A target word and the recording that speaks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub word: String,
    pub path: PathBuf,
}

/// Console side of a test run: prompts on `output`, answers from `input`.
pub struct Session<'p, R: BufRead, W: Write, P: AudioPlayer + ?Sized> {
    input: R,
    output: W,
    player: &'p P,
}

impl<'p, R: BufRead, W: Write, P: AudioPlayer + ?Sized> Session<'p, R, W, P> {
    pub fn new(input: R, output: W, player: &'p P) -> Self {
        Self {
            input,
            output,
            player,
        }
    }

    pub fn print_introduction(&mut self) -> Result<()> {
        for paragraph in INTRODUCTION {
            writeln!(self.output)?;
            writeln!(self.output, "{}", paragraph)?;
        }
        Ok(())
    }

    /// Blocks until the participant answers `y` (any case).
    pub fn wait_until_ready(&mut self) -> Result<()> {
        loop {
            let answer = self.prompt(READY_PROMPT)?;
            if answer.eq_ignore_ascii_case("y") {
                return Ok(());
            }
        }
    }

    /// Plays the clip, then reads a spelling, replaying for every `repeat`.
    pub fn collect_spelling(&mut self, clip: &Clip) -> Result<String> {
        self.player.play(&clip.path)?;
        let mut repeats = 0usize;
        loop {
            let answer = self.prompt(SPELLING_PROMPT)?;
            if !answer.eq_ignore_ascii_case(REPEAT_COMMAND) {
                tracing::debug!("'{}' spelled as '{}' after {} repeats", clip.word, answer, repeats);
                return Ok(answer);
            }
            repeats += 1;
            self.player.play(&clip.path)?;
        }
    }

    pub fn collect_spellings(&mut self, clips: &[Clip]) -> Result<Vec<String>> {
        clips.iter().map(|clip| self.collect_spelling(clip)).collect()
    }

    fn prompt(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SpellerError::SessionAborted);
        }
        Ok(line.trim().to_string())
    }
}
