//! HTML pages for search outcomes.
//!
//! Every function here is pure: the same outcome always renders to the same
//! bytes.

use axum::http::StatusCode;
use axum::response::Html;

use crate::pipeline::{FailureKind, PipelineResult, SearchResults, Stage};

/// Stream cards shown on the results page.
pub const DISPLAY_LIMIT: usize = 5;

const HOME_LINK: &str = r#"<p><a href="/">Go back home</a></p>"#;

const RESULTS_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; max-width: 1000px; margin: 20px auto; padding: 20px; background-color: #f5f5f5; }
        h1 { color: #6441a5; text-align: center; }
        .container { display: grid; grid-template-columns: 2fr 1fr; gap: 20px; }
        .streams-section, .weather-section { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .stream-card { border-left: 4px solid #6441a5; padding: 15px; margin-bottom: 15px; background: #f9f9f9; border-radius: 4px; }
        .stream-card a { color: #6441a5; text-decoration: none; font-weight: bold; }
        .watch-link { display: inline-block; margin-top: 10px; padding: 8px 16px; background-color: #6441a5; color: white !important; border-radius: 4px; }
        .weather-icon { text-align: center; }
        .temp { font-size: 32px; font-weight: bold; text-align: center; }
        .weather-detail { margin: 10px 0; padding: 10px; background: #f0f0f0; border-radius: 4px; }
        .back-link { text-align: center; margin-top: 20px; }
"#;

/// Status code and page for a pipeline outcome.
pub fn render_outcome(result: &PipelineResult) -> (StatusCode, Html<String>) {
    match result {
        PipelineResult::Success(results) => (StatusCode::OK, Html(results_page(results))),
        PipelineResult::GameNotFound { game } => {
            let line = format!("Couldn't find \"{}\" on Twitch.", escape_html(game));
            (
                StatusCode::OK,
                Html(message_page(
                    "Game Not Found",
                    &[line.as_str(), "Please check the spelling and try again."],
                )),
            )
        }
        PipelineResult::NoLiveStreams { .. } => (
            StatusCode::OK,
            Html(message_page(
                "No Live Streams Found",
                &[
                    "There are no live streams for this game right now.",
                    "Try again later or search for a different game.",
                ],
            )),
        ),
        PipelineResult::CityNotFound { city } => {
            let line = format!("Could not find weather data for \"{}\".", escape_html(city));
            (
                StatusCode::OK,
                Html(message_page(
                    "City Not Found",
                    &[line.as_str(), "Please check the city name and try again."],
                )),
            )
        }
        PipelineResult::AuthFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(message_page(
                "Authentication Error",
                &["Could not authenticate with Twitch. Please try again later."],
            )),
        ),
        PipelineResult::UpstreamError { stage, kind, .. } => {
            let (title, message) = upstream_message(*stage, *kind);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(message_page(title, &[message])),
            )
        }
    }
}

fn upstream_message(stage: Stage, kind: FailureKind) -> (&'static str, &'static str) {
    match (stage, kind) {
        (Stage::Category, FailureKind::Transport) => {
            ("Search Error", "Could not search Twitch. Please try again.")
        }
        (Stage::Category, FailureKind::Payload) => (
            "Error",
            "Something went wrong while searching for the game.",
        ),
        (Stage::Streams, FailureKind::Transport) => {
            ("Error", "Could not retrieve streams from Twitch.")
        }
        (Stage::Streams, FailureKind::Payload) => (
            "Error",
            "Something went wrong while processing stream data.",
        ),
        (Stage::Weather, FailureKind::Transport) => {
            ("Weather Error", "Could not retrieve weather data.")
        }
        (Stage::Weather, FailureKind::Payload) => ("Weather Error", "Could not process weather data."),
    }
}

/// Page for unknown paths and rejected searches.
pub fn not_found_page() -> String {
    format!("<h1>404 Not Found</h1>{HOME_LINK}")
}

/// Heading, a few paragraphs and the home link.
pub fn message_page(title: &str, lines: &[&str]) -> String {
    let mut html = format!("<h1>{title}</h1>\n");
    for line in lines {
        html.push_str(&format!("<p>{line}</p>\n"));
    }
    html.push_str(HOME_LINK);
    html
}

/// Combined streams + weather page.
pub fn results_page(results: &SearchResults) -> String {
    let city = escape_html(&results.city);
    let weather = &results.weather;
    let description = escape_html(&weather.description);

    let cards: String = results
        .streams
        .iter()
        .take(DISPLAY_LIMIT)
        .map(|stream| {
            let login = escape_html(&stream.user_login);
            format!(
                r#"
        <div class="stream-card">
            <h3><a href="https://twitch.tv/{login}" target="_blank">{name}</a></h3>
            <p><strong>Game:</strong> {game}</p>
            <p><strong>Title:</strong> {title}</p>
            <p><strong>Status:</strong> 🔴 LIVE</p>
            <p><strong>Viewers:</strong> {viewers}</p>
            <p><a href="https://twitch.tv/{login}" target="_blank" class="watch-link">Watch Stream →</a></p>
        </div>"#,
                name = escape_html(&stream.user_name),
                game = or_na(&stream.game_name),
                title = or_na(&stream.title),
                viewers = format_thousands(stream.viewer_count),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Stream &amp; Weather Results</title>
    <style>{RESULTS_STYLE}    </style>
</head>
<body>
    <h1>🎮 Top Streams &amp; Weather for {city}</h1>
    <div class="container">
        <div class="streams-section">
            <h2>Top Live Streams</h2>{cards}
        </div>
        <div class="weather-section">
            <h2>Weather in {city}</h2>
            <div class="weather-icon">
                <img src="{icon_url}" alt="{description}">
            </div>
            <div class="temp">{temp_c}°C / {temp_f}°F</div>
            <div class="weather-detail"><strong>Condition:</strong> {description}</div>
            <div class="weather-detail"><strong>Feels Like:</strong> {feels_c}°C / {feels_f}°F</div>
            <div class="weather-detail"><strong>Humidity:</strong> {humidity}%</div>
        </div>
    </div>
    <div class="back-link">
        <a href="/">← Search Again</a>
    </div>
</body>
</html>
"#,
        icon_url = escape_html(&weather.icon_url()),
        temp_c = weather.temp_c_rounded(),
        temp_f = weather.temp_f(),
        feels_c = weather.feels_like_c_rounded(),
        feels_f = weather.feels_like_f(),
        humidity = weather.humidity_pct,
    )
}

fn or_na(value: &str) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        escape_html(value)
    }
}

/// `1234567` -> `1,234,567`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use twitch_client::api::StreamSummary;
    use weather_client::WeatherReading;

    fn stream(login: &str, viewers: u64) -> StreamSummary {
        StreamSummary {
            user_login: login.into(),
            user_name: login.to_uppercase(),
            game_name: "Chess".into(),
            title: format!("{login} plays"),
            viewer_count: viewers,
        }
    }

    fn results(streams: Vec<StreamSummary>) -> SearchResults {
        SearchResults {
            streams,
            weather: WeatherReading {
                description: "light rain".into(),
                icon_code: "10d".into(),
                temp_c: 20.0,
                feels_like_c: 19.4,
                humidity_pct: 81,
            },
            city: "Paris".into(),
        }
    }

    #[test]
    fn results_render_identically_for_same_input() {
        let input = results(vec![stream("a", 1), stream("b", 2)]);
        assert_eq!(results_page(&input), results_page(&input.clone()));
    }

    #[test]
    fn cards_follow_provider_order() {
        let page = results_page(&results(vec![
            stream("alpha", 100),
            stream("bravo", 50),
            stream("charlie", 200),
        ]));

        assert_eq!(page.matches(r#"class="stream-card""#).count(), 3);
        let a = page.find("ALPHA").unwrap();
        let b = page.find("BRAVO").unwrap();
        let c = page.find("CHARLIE").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn at_most_five_cards_are_shown() {
        let many = (0..8).map(|i| stream(&format!("s{i}"), i)).collect();
        let page = results_page(&results(many));

        assert_eq!(page.matches(r#"class="stream-card""#).count(), DISPLAY_LIMIT);
        assert!(page.contains("https://twitch.tv/s4"));
        assert!(!page.contains("https://twitch.tv/s5"));
    }

    #[test]
    fn temperatures_show_both_units() {
        let page = results_page(&results(vec![stream("a", 1)]));
        assert!(page.contains("20°C / 68°F"));
        assert!(page.contains("19°C / 67°F"));
        assert!(page.contains("81%"));
        assert!(page.contains("https://openweathermap.org/img/wn/10d@2x.png"));
    }

    #[test]
    fn empty_title_shows_na() {
        let mut s = stream("a", 1);
        s.title.clear();
        let page = results_page(&results(vec![s]));
        assert!(page.contains("<strong>Title:</strong> N/A"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut input = results(vec![stream("a", 1)]);
        input.city = "<script>".into();
        let page = results_page(&input);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn outcome_status_codes() {
        let cases = [
            (PipelineResult::AuthFailed, StatusCode::INTERNAL_SERVER_ERROR, "Authentication Error"),
            (
                PipelineResult::GameNotFound { game: "x".into() },
                StatusCode::OK,
                "Game Not Found",
            ),
            (
                PipelineResult::NoLiveStreams { game: "x".into() },
                StatusCode::OK,
                "No Live Streams Found",
            ),
            (
                PipelineResult::CityNotFound { city: "x".into() },
                StatusCode::OK,
                "City Not Found",
            ),
            (
                PipelineResult::UpstreamError {
                    stage: Stage::Category,
                    kind: FailureKind::Transport,
                    detail: "refused".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "Search Error",
            ),
            (
                PipelineResult::UpstreamError {
                    stage: Stage::Weather,
                    kind: FailureKind::Payload,
                    detail: "bad json".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
                "Weather Error",
            ),
        ];

        for (result, status, heading) in cases {
            let (code, Html(body)) = render_outcome(&result);
            assert_eq!(code, status, "{heading}");
            assert!(body.contains(&format!("<h1>{heading}</h1>")), "{body}");
            assert!(body.contains(r#"<a href="/">"#));
        }
    }

    #[test]
    fn upstream_detail_is_not_shown() {
        let (_, Html(body)) = render_outcome(&PipelineResult::UpstreamError {
            stage: Stage::Streams,
            kind: FailureKind::Transport,
            detail: "secret-internal-detail".into(),
        });
        assert!(!body.contains("secret-internal-detail"));
    }
}
