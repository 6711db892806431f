//! Full-history retrieval through cursor-based pagination.
//!
//! The history endpoint returns bounded pages, newest first. Each page's
//! oldest timestamp (its last entry) becomes the `latest` cursor for the
//! next request, walking backwards through the channel until the
//! continuation flag goes false. The cursor is an explicit value threaded
//! through a sequential loop — each request depends on the previous
//! response, so there is nothing to parallelize.
//!
//! The accumulated result is the complete message set for the channel.
//! Order across pages is unspecified; the partitioner re-sorts everything
//! anyway.
//!
//! # Example
//!
//! ```rust,no_run
//! use mpdump::api::SlackClient;
//! use mpdump::history::fetch_full_history;
//!
//! let client = SlackClient::new("xoxp-...")?;
//! let messages = fetch_full_history(&client, "G024BE91L", 1000)?;
//! println!("{} messages", messages.len());
//! # Ok::<(), mpdump::MpdumpError>(())
//! ```

use crate::api::HistorySource;
use crate::error::Result;
use crate::message::Message;

/// Fetches every message ever posted to `channel`, as visible to the
/// authenticated caller.
///
/// Pages are requested sequentially with at most `page_size` messages
/// each. An empty first page yields an empty result — a valid outcome for
/// a channel with no history, not an error.
///
/// An empty page while the continuation flag is still true is a fetch
/// anomaly: the cursor cannot advance without data, so pagination stops
/// there instead of looping forever.
///
/// # Errors
///
/// Any transport or API error from the source aborts the fetch; there is
/// no retry and no partial-channel recovery.
pub fn fetch_full_history<S: HistorySource>(
    source: &S,
    channel: &str,
    page_size: u32,
) -> Result<Vec<Message>> {
    let page = source.fetch_page(channel, page_size, None)?;
    let mut messages = page.messages;
    let mut has_more = page.has_more;

    let mut latest = match messages.last() {
        Some(oldest) => oldest.ts.clone(),
        None => return Ok(messages),
    };

    while has_more {
        let page = source.fetch_page(channel, page_size, Some(&latest))?;
        if page.messages.is_empty() {
            break;
        }
        if let Some(oldest) = page.oldest_ts() {
            latest = oldest.to_string();
        }
        has_more = page.has_more;
        messages.extend(page.messages);
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::error::MpdumpError;
    use crate::message::{Group, HistoryPage};

    /// Scripted source that replays a fixed sequence of pages and records
    /// the cursor passed to each call.
    struct ScriptedSource {
        pages: RefCell<VecDeque<HistoryPage>>,
        cursors: RefCell<Vec<Option<String>>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<HistoryPage>) -> Self {
            Self {
                pages: RefCell::new(pages.into()),
                cursors: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.cursors.borrow().len()
        }
    }

    impl HistorySource for ScriptedSource {
        fn list_groups(&self) -> Result<Vec<Group>> {
            Ok(vec![])
        }

        fn fetch_page(
            &self,
            _channel: &str,
            _count: u32,
            latest: Option<&str>,
        ) -> Result<HistoryPage> {
            self.cursors
                .borrow_mut()
                .push(latest.map(ToString::to_string));
            self.pages
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| MpdumpError::Api {
                    method: "groups.history",
                    code: "script exhausted".to_string(),
                })
        }
    }

    fn page(timestamps: &[&str], has_more: bool) -> HistoryPage {
        HistoryPage::new(
            timestamps.iter().map(|ts| Message::new(*ts)).collect(),
            has_more,
        )
    }

    #[test]
    fn test_single_page() {
        let source = ScriptedSource::new(vec![page(&["300", "200", "100"], false)]);
        let messages = fetch_full_history(&source, "G1", 1000).unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_n_pages_exactly_n_calls() {
        let source = ScriptedSource::new(vec![
            page(&["600", "500"], true),
            page(&["400", "300"], true),
            page(&["200", "100"], false),
        ]);
        let messages = fetch_full_history(&source, "G1", 2).unwrap();

        assert_eq!(source.calls(), 3);

        // Union of all pages, order-independent.
        let mut timestamps: Vec<&str> = messages.iter().map(Message::ts).collect();
        timestamps.sort_unstable();
        assert_eq!(timestamps, vec!["100", "200", "300", "400", "500", "600"]);
    }

    #[test]
    fn test_cursor_is_previous_pages_oldest_ts() {
        let source = ScriptedSource::new(vec![
            page(&["600", "500"], true),
            page(&["400", "300"], true),
            page(&["200", "100"], false),
        ]);
        fetch_full_history(&source, "G1", 2).unwrap();

        let cursors = source.cursors.borrow();
        assert_eq!(
            *cursors,
            vec![None, Some("500".to_string()), Some("300".to_string())]
        );
    }

    #[test]
    fn test_empty_first_page_is_valid() {
        let source = ScriptedSource::new(vec![page(&[], false)]);
        let messages = fetch_full_history(&source, "G1", 1000).unwrap();

        assert_eq!(source.calls(), 1);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_empty_first_page_with_has_more_does_not_loop() {
        // No cursor can be derived from an empty page; the fetch must
        // stop even though the flag claims more history.
        let source = ScriptedSource::new(vec![page(&[], true)]);
        let messages = fetch_full_history(&source, "G1", 1000).unwrap();

        assert_eq!(source.calls(), 1);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_empty_later_page_with_has_more_stops() {
        let source = ScriptedSource::new(vec![
            page(&["300", "200"], true),
            page(&[], true),
            // Never requested.
            page(&["100"], false),
        ]);
        let messages = fetch_full_history(&source, "G1", 2).unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_transport_error_aborts() {
        // Script runs dry while has_more is still true: the stub's error
        // stands in for a failed fetch call.
        let source = ScriptedSource::new(vec![page(&["200", "100"], true)]);
        let result = fetch_full_history(&source, "G1", 2);

        assert!(matches!(
            result,
            Err(MpdumpError::Api {
                method: "groups.history",
                ..
            })
        ));
    }
}
