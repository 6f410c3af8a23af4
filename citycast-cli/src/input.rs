use citycast_core::UserAction;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};

/// Interpret one line typed in interactive mode.
///
/// `/N` picks the N-th search result (1-based), `/q` quits, anything else
/// replaces the search text. Returns `None` for unrecognised `/` commands.
pub fn parse_line(line: &str) -> Option<UserAction> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.trim().strip_prefix('/') else {
        return Some(UserAction::Type(line.to_string()));
    };

    match command.trim() {
        "q" | "quit" => Some(UserAction::Quit),
        n => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Some(UserAction::Pick(n - 1)),
            _ => None,
        },
    }
}

/// Forward typed lines to the event loop until `/q`, end of input, or the
/// loop going away.
///
/// Nothing more is read after `/q`: a pending read on a terminal cannot be
/// cancelled and would keep the process alive until the next Enter.
pub async fn forward_lines<R>(reader: R, actions: mpsc::UnboundedSender<UserAction>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_line(&line) {
                Some(action) => {
                    let quit = action == UserAction::Quit;
                    if actions.send(action).is_err() || quit {
                        break;
                    }
                }
                None => eprintln!("Unknown command: {}", line.trim()),
            },
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read input");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_search_input() {
        assert_eq!(parse_line("Da Nang\n"), Some(UserAction::Type("Da Nang".into())));
        assert_eq!(parse_line(""), Some(UserAction::Type(String::new())));
    }

    #[test]
    fn slash_number_picks_one_based() {
        assert_eq!(parse_line("/1"), Some(UserAction::Pick(0)));
        assert_eq!(parse_line(" /12 "), Some(UserAction::Pick(11)));
    }

    #[test]
    fn slash_q_quits() {
        assert_eq!(parse_line("/q"), Some(UserAction::Quit));
        assert_eq!(parse_line("/quit\r\n"), Some(UserAction::Quit));
    }

    #[test]
    fn unknown_commands_are_ignored() {
        assert_eq!(parse_line("/0"), None);
        assert_eq!(parse_line("/help"), None);
    }

    #[tokio::test]
    async fn stops_reading_after_quit() {
        let mut input: &[u8] = b"Lon\n/q\nextra\n";
        let (tx, mut rx) = mpsc::unbounded_channel();

        forward_lines(&mut input, tx).await;

        assert_eq!(rx.recv().await, Some(UserAction::Type("Lon".into())));
        assert_eq!(rx.recv().await, Some(UserAction::Quit));
        assert_eq!(rx.recv().await, None);
        assert_eq!(input, b"extra\n");
    }

    #[tokio::test]
    async fn skips_unknown_commands_and_stops_at_eof() {
        let input: &[u8] = b"/help\nHue\n/2";
        let (tx, mut rx) = mpsc::unbounded_channel();

        forward_lines(input, tx).await;

        assert_eq!(rx.recv().await, Some(UserAction::Type("Hue".into())));
        assert_eq!(rx.recv().await, Some(UserAction::Pick(1)));
        assert_eq!(rx.recv().await, None);
    }
}
