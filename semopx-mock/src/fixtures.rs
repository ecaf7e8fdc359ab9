use semopx_core::{IndexItem, IndexPage, ResultDocument, ResultRow, SessionKind};
use serde_json::json;

/// Publication dates in index order (newest first).
pub const DATES: [&str; 7] = [
    "2024-03-07",
    "2024-03-06",
    "2024-03-05",
    "2024-03-04",
    "2024-03-03",
    "2024-03-02",
    "2024-03-01",
];

/// Items per index page.
pub const PAGE_SIZE: usize = 8;

/// Delivery hours covered by every fixture document.
pub const HOURS: u32 = 4;

/// Resource identifier of a session's result for `date`.
#[must_use]
pub fn resource_name(kind: SessionKind, date: &str) -> String {
    format!("MarketResult_{}_PWR-MRC-D+1_{date}", kind.tag())
}

/// Price (per MWh) the fixtures publish for `kind` at `hour` in the ROI area.
#[must_use]
pub fn roi_price(kind: SessionKind, hour: u32) -> f64 {
    let base = match kind {
        SessionKind::DayAhead => 100.0,
        SessionKind::Ida1 => 110.0,
        SessionKind::Ida2 => 120.0,
        SessionKind::Ida3 => 130.0,
    };
    base + f64::from(hour) * 10.0
}

fn items() -> Vec<IndexItem> {
    DATES
        .iter()
        .flat_map(|date| {
            let published = format!("{date}T10:15:00");
            SessionKind::ALL
                .into_iter()
                .map(|kind| resource_name(kind, date))
                .chain(std::iter::once(format!("BM-086_{date}")))
                .map(move |name| IndexItem::new(published.clone(), name))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Total number of index pages.
#[must_use]
pub fn total_pages() -> u32 {
    let n = items().len().div_ceil(PAGE_SIZE);
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Index page `page` (1-based), or `None` past the end.
#[must_use]
pub fn index_page(page: u32) -> Option<IndexPage> {
    let total = total_pages();
    if page == 0 || page > total {
        return None;
    }
    let start = usize::try_from(page - 1).ok()? * PAGE_SIZE;
    let chunk: Vec<IndexItem> = items().into_iter().skip(start).take(PAGE_SIZE).collect();
    Some(IndexPage::new(chunk, total))
}

/// Result document for `resource_name`, or `None` for unknown resources.
///
/// Each document carries an ROI row (string descriptor) and an NI row (array
/// descriptor) covering `HOURS` hourly timestamps of the publication date.
#[must_use]
pub fn document(resource_name: &str) -> Option<ResultDocument> {
    let kind = SessionKind::classify(resource_name)?;
    let date = resource_name.get(resource_name.len().checked_sub(10)?..)?;
    if !DATES.contains(&date) {
        return None;
    }
    let stamps: Vec<String> = (0..HOURS)
        .map(|h| format!("{date}T{h:02}:00:00Z"))
        .collect();

    let roi = ResultRow::new(
        format!("ROI-{}", kind.tag()),
        stamps.clone(),
        (0..HOURS).map(|h| roi_price(kind, h)),
    );
    let ni = ResultRow::new(
        json!(["NI", format!("NI-{}", kind.tag())]),
        stamps,
        (0..HOURS).map(|h| roi_price(kind, h) + 50.0),
    );
    Some(ResultDocument {
        rows: vec![roi, ni],
    })
}
