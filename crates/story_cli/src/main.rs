//! Terminal front end for the story editor.
//!
//! # Responsibility
//! - Drive `story_core::StoryEditor` from line commands on stdin.
//! - Provide terminal-side clipboard (OSC 52) and intent-opener hooks.
//!
//! # Invariants
//! - Every failure is printed and the loop continues; only `quit`/EOF exit.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::info;
use story_core::{
    init_logging, ClipboardError, ClipboardWriter, DraftField, EditorConfig, EditorTab,
    EditorView, ImageApplied, ImageError, IntentOpener, LogSettings, SaveOutcome, StoryEditor,
};
use std::io::{self, BufRead, Write};
use std::path::Path;

const ENV_PAGE_URL: &str = "STORY_EDITOR_PAGE_URL";
const DEFAULT_PAGE_URL: &str = "http://localhost/";
const OSC52_MAX_BYTES: usize = 100 * 1024;

const HELP: &str = "\
commands:
  title <text>     set draft title
  byline <text>    set draft byline
  text <text>      set draft body (max words apply on save)
  image <path>     attach an image file to the draft
  save             save or update the draft
  edit <n>         load story n into the draft
  delete <n>       delete story n
  list             show saved stories
  draft            show the draft
  share <n>        print the share URL for story n
  link <n>         copy the deep link for story n
  help             show this text
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Set(DraftField, String),
    Image(String),
    Save,
    Edit(usize),
    Delete(usize),
    List,
    Draft,
    Share(usize),
    Link(usize),
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let index = || {
            rest.parse::<usize>()
                .map_err(|_| format!("`{name}` needs a story number, got `{rest}`"))
        };
        match name.to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Set(DraftField::Title, rest.to_string())),
            "byline" => Ok(Self::Set(DraftField::Byline, rest.to_string())),
            "text" => Ok(Self::Set(DraftField::Text, rest.to_string())),
            "image" if rest.is_empty() => Err("`image` needs a file path".to_string()),
            "image" => Ok(Self::Image(rest.to_string())),
            "save" => Ok(Self::Save),
            "edit" => index().map(Self::Edit),
            "delete" => index().map(Self::Delete),
            "list" => Ok(Self::List),
            "draft" => Ok(Self::Draft),
            "share" => index().map(Self::Share),
            "link" => index().map(Self::Link),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command `{other}`; try `help`")),
        }
    }
}

/// Writes clipboard text through the OSC 52 terminal escape.
struct Osc52Clipboard<W: Write> {
    out: W,
    in_tmux: bool,
}

impl<W: Write> ClipboardWriter for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if text.len() > OSC52_MAX_BYTES {
            return Err(ClipboardError::Io(format!(
                "{} bytes exceeds terminal limit",
                text.len()
            )));
        }
        let payload = STANDARD.encode(text.as_bytes());
        let sequence = if self.in_tmux {
            format!("\x1bPtmux;\x1b\x1b]52;c;{payload}\x07\x1b\\")
        } else {
            format!("\x1b]52;c;{payload}\x07")
        };
        self.out
            .write_all(sequence.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|err| ClipboardError::Io(err.to_string()))
    }
}

/// Prints intent URLs for the user to open.
struct PrintOpener<W: Write> {
    out: W,
}

impl<W: Write> IntentOpener for PrintOpener<W> {
    fn open(&mut self, url: &str) {
        let _ = writeln!(self.out, "open: {url}");
    }
}

struct Session {
    editor: StoryEditor,
    page_url: String,
}

impl Session {
    fn new(editor: StoryEditor, page_url: impl Into<String>) -> Self {
        Self {
            editor,
            page_url: page_url.into(),
        }
    }

    /// Runs one command. Returns `false` when the loop should stop.
    fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
        clipboard: &mut dyn ClipboardWriter,
        opener: &mut dyn IntentOpener,
    ) -> io::Result<bool> {
        match command {
            Command::Set(field, value) => {
                self.editor.set_field(field, value);
                writeln!(
                    out,
                    "{} set ({} words left)",
                    field.as_str(),
                    self.editor.words_remaining()
                )?;
            }
            Command::Image(path) => {
                let result = load_image_file(Path::new(&path))
                    .map_err(Into::into)
                    .and_then(|bytes| self.editor.attach_image(Some(bytes)));
                match result {
                    Ok(Some(ImageApplied::Attached)) => writeln!(out, "image attached")?,
                    Ok(Some(ImageApplied::Discarded)) | Ok(None) => {
                        writeln!(out, "image not attached")?
                    }
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            Command::Save => match self.editor.save() {
                Ok(SaveOutcome::Created(_)) => writeln!(out, "story saved")?,
                Ok(SaveOutcome::Updated(_)) => writeln!(out, "story updated")?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Edit(index) => match self.editor.begin_edit_at(index) {
                Ok(()) => {
                    writeln!(out, "editing story {index}")?;
                    render_draft(&EditorView::capture(&self.editor, EditorTab::Write), out)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Delete(index) => match self.editor.delete_at(index) {
                Ok(_) => writeln!(out, "story {index} deleted")?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::List => {
                render_list(&EditorView::capture(&self.editor, EditorTab::Stories), out)?
            }
            Command::Draft => {
                render_draft(&EditorView::capture(&self.editor, EditorTab::Write), out)?
            }
            Command::Share(index) => {
                let result = self
                    .editor
                    .id_at(index)
                    .and_then(|id| self.editor.share(id, opener));
                if let Err(err) = result {
                    writeln!(out, "error: {err}")?;
                }
            }
            Command::Link(index) => {
                let result = self.editor.id_at(index).and_then(|id| {
                    self.editor
                        .copy_link(id, self.page_url.as_str(), clipboard)
                });
                match result {
                    Ok(ack) => writeln!(out, "{ack}")?,
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn load_image_file(path: &Path) -> Result<Vec<u8>, ImageError> {
    std::fs::read(path).map_err(|err| ImageError::Unreadable(format!("{}: {err}", path.display())))
}

fn render_draft<W: Write>(view: &EditorView, out: &mut W) -> io::Result<()> {
    writeln!(out, "[{}]", view.submit_label)?;
    writeln!(out, "title:  {}", view.draft.title)?;
    writeln!(out, "byline: {}", view.draft.byline)?;
    writeln!(
        out,
        "text:   {} ({}/{} words)",
        view.draft.text, view.draft_word_count, view.max_words
    )?;
    if view.draft.image.is_some() {
        writeln!(out, "image:  attached")?;
    }
    Ok(())
}

fn render_list<W: Write>(view: &EditorView, out: &mut W) -> io::Result<()> {
    if let Some(message) = view.empty_message {
        return writeln!(out, "{message}");
    }
    for card in &view.cards {
        writeln!(out, "#{} {}", card.index, card.title)?;
        if let Some(byline) = &card.byline_label {
            writeln!(out, "   {byline}")?;
        }
        if card.image.is_some() {
            writeln!(out, "   [image]")?;
        }
        for line in card.text.lines() {
            writeln!(out, "   {line}")?;
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    if let Some(settings) = LogSettings::from_env() {
        if let Err(err) = init_logging(&settings) {
            eprintln!("logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        story_core::core_version()
    );

    let page_url = std::env::var(ENV_PAGE_URL)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PAGE_URL.to_string());
    let mut session = Session::new(StoryEditor::new(EditorConfig::default()), page_url);
    let mut clipboard = Osc52Clipboard {
        out: io::stdout(),
        in_tmux: std::env::var_os("TMUX").is_some(),
    };
    let mut opener = PrintOpener { out: io::stdout() };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "story editor {} (type `help`)", story_core::core_version())?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let keep_going = match Command::parse(line.as_str()) {
            Ok(command) => session.execute(command, &mut stdout, &mut clipboard, &mut opener)?,
            Err(message) => {
                writeln!(stdout, "error: {message}")?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_image_file, Command, Osc52Clipboard, PrintOpener, Session};
    use story_core::{
        ClipboardError, ClipboardWriter, DraftField, EditorConfig, ImageError, StoryEditor,
    };
    use std::io::Write;

    struct RecordingClipboard(Vec<String>);

    impl ClipboardWriter for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    fn run(session: &mut Session, lines: &[&str]) -> (String, Vec<String>, String) {
        let mut out = Vec::new();
        let mut clipboard = RecordingClipboard(Vec::new());
        let mut opened = Vec::new();
        {
            let mut opener = PrintOpener { out: &mut opened };
            for line in lines {
                let command = Command::parse(line).expect("test commands parse");
                session
                    .execute(command, &mut out, &mut clipboard, &mut opener)
                    .expect("writing to a Vec cannot fail");
            }
        }
        (
            String::from_utf8(out).expect("utf-8 output"),
            clipboard.0,
            String::from_utf8(opened).expect("utf-8 output"),
        )
    }

    fn session() -> Session {
        Session::new(StoryEditor::new(EditorConfig::default()), "http://localhost/")
    }

    #[test]
    fn parse_recognises_commands_and_arguments() {
        assert_eq!(
            Command::parse("title  The Long Night "),
            Ok(Command::Set(DraftField::Title, "The Long Night".to_string()))
        );
        assert_eq!(Command::parse("edit 2"), Ok(Command::Edit(2)));
        assert_eq!(Command::parse("SAVE"), Ok(Command::Save));
        assert!(Command::parse("delete two").is_err());
        assert!(Command::parse("image").is_err());
        assert!(Command::parse("publish").is_err());
    }

    #[test]
    fn save_list_edit_and_delete_flow() {
        let mut session = session();
        let (out, _, _) = run(
            &mut session,
            &["title Night Bus", "byline Jane", "text It rained.", "save", "list"],
        );
        assert!(out.contains("story saved"));
        assert!(out.contains("#0 Night Bus"));
        assert!(out.contains("By: Jane"));

        let (out, _, _) = run(&mut session, &["edit 0", "text Dry night.", "save", "delete 0", "list"]);
        assert!(out.contains("[Update Story]"));
        assert!(out.contains("story updated"));
        assert!(out.contains("story 0 deleted"));
        assert!(out.contains("No stories yet."));
    }

    #[test]
    fn out_of_range_index_prints_error() {
        let mut session = session();
        let (out, _, _) = run(&mut session, &["edit 3"]);
        assert!(out.contains("error: story index 3 out of range (have 0)"));
    }

    #[test]
    fn share_and_link_use_host_hooks() {
        let mut session = session();
        let (out, copied, opened) =
            run(&mut session, &["title T", "save", "share 0", "link 0"]);
        assert!(opened.starts_with("open: https://twitter.com/intent/tweet?text=T"));
        assert_eq!(copied, vec!["http://localhost/#story-0".to_string()]);
        assert!(out.contains("Link copied to clipboard!"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = session();
        let mut out = Vec::new();
        let mut clipboard = RecordingClipboard(Vec::new());
        let mut opener = PrintOpener { out: Vec::new() };
        let keep_going = session
            .execute(Command::Quit, &mut out, &mut clipboard, &mut opener)
            .expect("quit never fails");
        assert!(!keep_going);
    }

    #[test]
    fn osc52_clipboard_emits_base64_sequence() {
        let mut buffer = Vec::new();
        {
            let mut clipboard = Osc52Clipboard {
                out: &mut buffer,
                in_tmux: false,
            };
            clipboard.write_text("hi").expect("write succeeds");
        }
        assert_eq!(buffer, b"\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn image_command_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"GIF89a\x01\x00\x01\x00").expect("write gif");

        let mut session = session();
        let command = format!("image {}", file.path().display());
        let (out, _, _) = run(&mut session, &[command.as_str(), "draft"]);
        assert!(out.contains("image attached"));
        assert!(out.contains("image:  attached"));
    }

    #[test]
    fn missing_image_file_is_unreadable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_image_file(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ImageError::Unreadable(_)));
    }
}
