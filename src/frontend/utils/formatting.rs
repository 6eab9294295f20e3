use chrono::{DateTime, Local, Utc};
use leptos::prelude::*;
use std::sync::OnceLock;
use timeago::Formatter;

pub fn post_path(id: crate::common::newtypes::PostId) -> String {
    format!("/post/{id}")
}

/// Relative time with the absolute local time as tooltip.
pub fn created_time(date_time: DateTime<Utc>) -> impl IntoView {
    let absolute_time = date_time
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    let time_ago = time_ago(date_time);
    view! { <span title=absolute_time>{time_ago}</span> }
}

pub fn time_ago(time: DateTime<Utc>) -> String {
    static INSTANCE: OnceLock<Formatter> = OnceLock::new();
    let secs = Utc::now().signed_duration_since(time).num_seconds();
    let duration = std::time::Duration::from_secs(secs.try_into().unwrap_or_default());
    INSTANCE.get_or_init(Formatter::new).convert(duration)
}

/// Recipe text is plain text; every line break in it is kept.
pub fn paragraphs(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

pub fn multiline_text(text: &str) -> impl IntoView {
    paragraphs(text)
        .into_iter()
        .map(|line| view! { <p class="min-h-4">{line}</p> })
        .collect::<Vec<_>>()
}
