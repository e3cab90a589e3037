//! Handing a launch URL to the outside world: browser and clipboard.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use reqwest::Url;
use tracing::{debug, info};

/// Toast shown after a successful copy.
pub const COPIED_MESSAGE: &str = "Link copied to clipboard!";

/// How the URL reached the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// A platform clipboard utility accepted it.
    System(&'static str),
    /// Written as an OSC 52 escape; the terminal does the copy.
    Osc52,
}

/// Parse `url`, accepting only http(s) targets.
pub fn validate_url(url: &str) -> io::Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to open {other}: URL"),
        )),
    }
}

fn opener(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(url);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Open `url` in the user's default browser without waiting for it.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    let url = validate_url(url)?;
    opener(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    info!(%url, "opened in browser");
    Ok(())
}

/// Clipboard utilities to try, in order, for this platform.
fn clipboard_commands() -> &'static [(&'static str, &'static [&'static str])] {
    if cfg!(target_os = "macos") {
        &[("pbcopy", &[])]
    } else if cfg!(windows) {
        &[("clip", &[])]
    } else {
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

/// Place `text` on the system clipboard.
///
/// Falls back to an OSC 52 escape when no clipboard utility is available,
/// which covers SSH sessions and bare terminals. The escape goes to stderr
/// so piped stdout stays clean.
pub fn copy_to_clipboard(text: &str) -> io::Result<CopyMethod> {
    copy_with(clipboard_commands(), &mut io::stderr(), text)
}

/// Try each `(program, args)` candidate in turn, then write the OSC 52
/// escape for `text` to `out`.
fn copy_with(
    candidates: &[(&'static str, &[&str])],
    out: &mut impl Write,
    text: &str,
) -> io::Result<CopyMethod> {
    for &(program, args) in candidates {
        match pipe_to(program, args, text) {
            Ok(()) => {
                info!(program, "copied to clipboard");
                return Ok(CopyMethod::System(program));
            }
            Err(e) => debug!(program, error = %e, "clipboard utility unavailable"),
        }
    }

    execute!(out, CopyToClipboard::to_clipboard_from(text))?;
    info!("copied to clipboard via OSC 52");
    Ok(CopyMethod::Osc52)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://play.example.com/play/G1?token=abc").is_ok());
        assert!(validate_url("http://localhost:8080/x").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = validate_url("file:///etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("file"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(validate_url("not a url").is_err());
        assert!(open_in_browser("javascript:alert(1)").is_err());
    }

    #[test]
    fn every_platform_has_a_clipboard_command() {
        assert!(!clipboard_commands().is_empty());
    }

    #[test]
    fn missing_utilities_fall_back_to_osc52() {
        let no_args: &[&str] = &[];
        let mut out = Vec::new();
        let method = copy_with(
            &[
                ("gamedeck-no-such-clipboard-tool", no_args),
                ("gamedeck-also-missing", &["-x"][..]),
            ],
            &mut out,
            "https://x/y",
        )
        .unwrap();
        assert_eq!(method, CopyMethod::Osc52);
        // base64("https://x/y") == "aHR0cHM6Ly94L3k="
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b]52;c;aHR0cHM6Ly94L3k=\x1b\\"), "{written:?}");
    }

    #[test]
    fn no_candidates_goes_straight_to_osc52() {
        let mut out = Vec::new();
        let method = copy_with(&[], &mut out, "ab").unwrap();
        assert_eq!(method, CopyMethod::Osc52);
        assert!(String::from_utf8(out).unwrap().contains("\x1b]52;c;YWI=\x1b\\"));
    }
}
