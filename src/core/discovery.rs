//! Channel discovery via paginated keyword search.

use tracing::{debug, warn};

use crate::adapters::{PlatformError, VideoPlatform};
use crate::domain::ChannelId;

/// Collect channel ids for a keyword across search pages, in result order.
///
/// Pagination follows the continuation token until the platform stops
/// returning one, or until `max_pages` pages have been consumed. The bound
/// exists because a broad keyword can match an effectively unbounded
/// result set; a bound of zero fetches nothing.
///
/// Any platform error (including quota exhaustion) aborts discovery; there
/// is no retry.
pub async fn discover_channels(
    platform: &dyn VideoPlatform,
    query: &str,
    page_size: u32,
    max_pages: u32,
) -> Result<Vec<ChannelId>, PlatformError> {
    if max_pages == 0 {
        return Ok(Vec::new());
    }

    let mut channels = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = platform
            .search_channels(query, page_size, page_token.as_deref())
            .await?;

        debug!(
            page = pages + 1,
            items = page.channel_ids.len(),
            "search page received"
        );
        channels.extend(page.channel_ids);
        pages += 1;

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
        if pages >= max_pages {
            warn!(max_pages, "page bound reached, stopping discovery early");
            break;
        }
    }

    Ok(channels)
}
