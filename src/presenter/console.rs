//! Line-oriented terminal presenter.
//!
//! Prints prompts and counts as they happen and can hand speech to an
//! external text-to-speech program such as `say` or `espeak`.

use std::io::Write;
use std::process::{Child, Command, Stdio};

use colored::Colorize;
use tracing::debug;

use super::{is_count, Presenter};
use crate::error::BreatheError;
use crate::session::{EndReason, HapticKind};

/// An external speech program and its leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speech {
    program: String,
    args: Vec<String>,
}

impl Speech {
    /// Parse a command line such as `say -v "Good News"` with shell quoting.
    ///
    /// Returns `None` for a blank command.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::Config` if the quoting is unbalanced.
    pub fn parse(command: &str) -> Result<Option<Self>, BreatheError> {
        let mut parts = shell_words::split(command)
            .map_err(|e| BreatheError::Config(format!("Invalid speech_command '{command}': {e}")))?
            .into_iter();
        Ok(parts.next().map(|program| Self {
            program,
            args: parts.collect(),
        }))
    }

    /// Spawn the program for `text` without waiting for it.
    fn spawn(&self, text: &str) -> Result<Child, BreatheError> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BreatheError::Presenter(format!("Failed to run {}: {e}", self.program)))
    }
}

/// A speech program plus the utterances it may still be speaking.
#[derive(Debug)]
pub struct Voice {
    speech: Speech,
    speaking: Vec<Child>,
}

impl Voice {
    /// Wrap a speech program.
    #[must_use]
    pub const fn new(speech: Speech) -> Self {
        Self {
            speech,
            speaking: Vec::new(),
        }
    }

    /// Start speaking `text` without waiting for earlier utterances.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::Presenter` if the program cannot be started.
    pub fn say(&mut self, text: &str) -> Result<(), BreatheError> {
        self.speaking
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
        let child = self.speech.spawn(text)?;
        self.speaking.push(child);
        Ok(())
    }
}

/// Writes session effects to a terminal.
pub struct ConsolePresenter<W: Write> {
    out: W,
    voice: Option<Voice>,
    haptics: bool,
}

impl<W: Write> ConsolePresenter<W> {
    /// Create a presenter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            voice: None,
            haptics: false,
        }
    }

    /// Speak through an external program as well as printing.
    #[must_use]
    pub fn with_speech(mut self, speech: Option<Speech>) -> Self {
        self.voice = speech.map(Voice::new);
        self
    }

    /// Ring the terminal bell for haptic pulses.
    #[must_use]
    pub const fn with_haptics(mut self, enabled: bool) -> Self {
        self.haptics = enabled;
        self
    }

    /// Consume the presenter and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn speak(&mut self, text: &str) -> Result<(), BreatheError> {
        if is_count(text) {
            writeln!(self.out, "   {text}")?;
        } else {
            writeln!(self.out, "{}", text.cyan().bold())?;
        }
        self.out.flush()?;

        if let Some(voice) = &mut self.voice {
            voice.say(text)?;
        }
        Ok(())
    }

    fn haptic(&mut self, kind: HapticKind) -> Result<(), BreatheError> {
        if self.haptics && kind != HapticKind::Light {
            write!(self.out, "\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn animate(&mut self, target_scale: f32, duration_secs: u32) -> Result<(), BreatheError> {
        debug!(target_scale, duration_secs, "circle animation");
        Ok(())
    }

    fn ended(&mut self, reason: EndReason, cycles: u32) -> Result<(), BreatheError> {
        let plural = if cycles == 1 { "" } else { "s" };
        let line = match reason {
            EndReason::Completed => format!("✅ Session complete: {cycles} cycle{plural}")
                .green()
                .to_string(),
            EndReason::Stopped => format!("⏹️  Session stopped after {cycles} cycle{plural}"),
        };
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_speech_parse() {
        let speech = Speech::parse("espeak -s 140").unwrap().unwrap();
        assert_eq!(speech.program, "espeak");
        assert_eq!(speech.args, vec!["-s", "140"]);
        assert!(Speech::parse("   ").unwrap().is_none());
    }

    #[test]
    fn test_speech_parse_keeps_quoted_arguments() {
        let speech = Speech::parse(r#"say -v "Good News""#).unwrap().unwrap();
        assert_eq!(speech.program, "say");
        assert_eq!(speech.args, vec!["-v", "Good News"]);

        let speech = Speech::parse("espeak -v 'en-us+f3'").unwrap().unwrap();
        assert_eq!(speech.args, vec!["-v", "en-us+f3"]);
    }

    #[test]
    fn test_speech_parse_unbalanced_quote() {
        assert!(matches!(
            Speech::parse(r#"say -v "Good News"#),
            Err(BreatheError::Config(_))
        ));
    }

    #[test]
    fn test_speak_prints_prompts_and_counts() {
        colored::control::set_override(false);
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter.speak("Inhale").unwrap();
        presenter.speak("4").unwrap();

        assert_eq!(output(presenter), "Inhale\n   4\n");
    }

    #[test]
    fn test_empty_text_is_not_a_count() {
        colored::control::set_override(false);
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter.speak("").unwrap();
        assert_eq!(output(presenter), "\n");
    }

    #[test]
    fn test_haptics_ring_bell_only_when_enabled() {
        let mut quiet = ConsolePresenter::new(Vec::new());
        quiet.haptic(HapticKind::Success).unwrap();
        assert_eq!(output(quiet), "");

        let mut loud = ConsolePresenter::new(Vec::new()).with_haptics(true);
        loud.haptic(HapticKind::Light).unwrap();
        loud.haptic(HapticKind::Medium).unwrap();
        assert_eq!(output(loud), "\x07");
    }

    #[test]
    fn test_missing_speech_program_is_an_error() {
        let speech = Speech::parse("definitely-not-a-real-tts-program-xyz").unwrap();
        let mut presenter = ConsolePresenter::new(Vec::new()).with_speech(speech);
        let result = presenter.speak("Inhale");
        assert!(matches!(result, Err(BreatheError::Presenter(_))));
    }

    #[test]
    fn test_ended_message() {
        colored::control::set_override(false);
        let mut presenter = ConsolePresenter::new(Vec::new());
        presenter.ended(EndReason::Stopped, 1).unwrap();
        assert!(output(presenter).contains("stopped after 1 cycle\n"));
    }
}
