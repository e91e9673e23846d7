use crate::config::Settings;
use crate::structs::*;

use governor::{Quota, RateLimiter};
use log::{info, warn};
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::time::Duration;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Fetches all twelve months of a year in order, skipping the ones that
/// fail. The rate limiter releases one request per configured period so the
/// site never sees back-to-back hits.
pub async fn build_year(settings: &Settings, year: i32) -> Result<YearSnapshot> {
    let client = Client::builder()
        .gzip(true)
        .user_agent(&settings.user_agent)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;

    let period = Duration::from_millis(settings.sleep_between_months_ms);
    let quota = Quota::with_period(period).ok_or("inter-month pause must be nonzero")?;
    let throttle = RateLimiter::direct(quota);

    info!("building year {year}");
    let mut snapshot = YearSnapshot::new();
    for month in 1..=12 {
        throttle.until_ready().await;
        if let Some((name, days)) = fetch_month(&client, settings, month, year).await {
            snapshot.insert(name.to_string(), serde_json::to_value(days)?);
        }
    }
    Ok(snapshot)
}

/// One month: GET the page with retries, parse the ephemeris table. Every
/// failure collapses to `None` after a log line; the caller just moves on.
pub async fn fetch_month(
    client: &Client,
    settings: &Settings,
    month: u32,
    year: i32,
) -> Option<(&'static str, MonthRecord)> {
    let name = month_name(month)?;
    let url = format!(
        "{}/astrology-ephemeris-{}-{}",
        settings.base_url.trim_end_matches('/'),
        name.to_lowercase(),
        year
    );

    info!("fetching {name} {year}");
    let html = match get_with_retries(client, &url, settings).await {
        Ok(body) => body,
        Err(e) => {
            warn!("failed {name} {year}: {e}");
            return None;
        }
    };

    match parse_month(&html) {
        Ok(days) => Some((name, days)),
        Err(e) => {
            warn!("{e} for {name} {year}");
            None
        }
    }
}

async fn get_with_retries(client: &Client, url: &str, settings: &Settings) -> reqwest::Result<String> {
    let mut attempt = 0;
    loop {
        match try_get(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) if attempt < settings.retries => {
                attempt += 1;
                warn!("attempt {attempt} for {url} failed: {e}");
                tokio::time::sleep(Duration::from_millis(settings.retry_delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn try_get(client: &Client, url: &str) -> reqwest::Result<String> {
    client.get(url).send().await?.error_for_status()?.text().await
}

/// Extracts per-day placements from the first table in the document.
///
/// Structural surprises degrade to skipped rows rather than errors: a row
/// only counts if it carries the full planet column set and a readable day
/// number. Only a completely empty result (no table, or nothing parsed)
/// comes back as `Err`.
pub fn parse_month(html: &str) -> Result<MonthRecord> {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("table")?;
    let row_sel = Selector::parse(":scope tr")?;
    let cell_sel = Selector::parse(":scope td")?;
    let planet_sel = Selector::parse(":scope td.udaj_planeta")?;
    let img_sel = Selector::parse(":scope img")?;
    let span_sel = Selector::parse(":scope span")?;
    let day_re = Regex::new(r"\b([0-3]?\d)\b")?;

    let table = doc.select(&table_sel).next().ok_or("no table found")?;

    let mut days = MonthRecord::new();
    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef> = row.select(&planet_sel).collect();
        // header and filler rows don't carry the full planet column set
        if cells.len() < PLANETS.len() {
            continue;
        }
        let Some(day) = extract_day_num(row, &cell_sel, &day_re) else {
            continue;
        };

        let mut daily = DayRecord::new();
        for ((_, planet), cell) in PLANETS.iter().zip(cells.iter()) {
            let sign = cell
                .select(&img_sel)
                .next()
                .and_then(|img| img.attr("alt"))
                .and_then(|alt| zodiac_name(alt.trim()))
                .unwrap_or("Unknown");
            let degree = cell
                .select(&span_sel)
                .map(|s| s.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            daily.insert(planet.to_string(), format!("{sign} {degree}").trim().into());
        }
        days.insert(day, daily);
    }

    if days.is_empty() {
        return Err("no rows parsed".into());
    }
    Ok(days)
}

// First cell usually reads like "Sat 2"; any bare one- or two-digit number
// counts as the day.
fn extract_day_num(row: ElementRef, cell_sel: &Selector, day_re: &Regex) -> Option<u32> {
    let first = row.select(cell_sel).next()?;
    let text = first.text().map(str::trim).collect::<Vec<_>>().join(" ");
    day_re.captures(&text)?.get(1)?.as_str().parse().ok()
}
