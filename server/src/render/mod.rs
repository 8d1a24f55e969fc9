//! Server side HTML for the feed pages.
//!
//! Pages are tera templates rendered from the same views the JSON API returns,
//! so both always agree.

use std::{borrow::Cow, collections::HashMap};

use axum::{http::StatusCode, response::Html};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tera::{Context, Filter, Function, Tera, Value};
use tracing::error;

use anothersky_core::config::DisplayConfig;

use crate::{
    http_error::{ApiResult, HttpError},
    schema::FeedView,
};

const DAY_FORMAT: &str = "%Y/%m/%d";
const LOCAL_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// One-off message shown above the feed after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    DeleteFailed,
}

impl Notice {
    fn message(self) -> &'static str {
        match self {
            Notice::DeleteFailed => "Could not delete the moment. Please try again.",
        }
    }
}

/// Page templates, loaded once at startup
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new(display: &DisplayConfig) -> tera::Result<Templates> {
        let mut tera = Tera::default();
        tera.register_filter("text", Text);
        tera.register_filter("attr", Attr);
        tera.register_filter("day", Day);
        tera.register_filter(
            "local_time",
            LocalTime {
                zone: display.time_zone,
            },
        );
        tera.register_function("feed_href", FeedHref);
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("../../templates/layout.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("trip.html", include_str!("../../templates/trip.html")),
            ("error.html", include_str!("../../templates/error.html")),
        ])?;
        Ok(Templates { tera })
    }

    pub fn feed_page(
        &self,
        display: &DisplayConfig,
        view: &FeedView,
        notice: Option<Notice>,
    ) -> ApiResult<Html<String>> {
        match view {
            FeedView::Index(index) => {
                let mut context = page_context(display, &display.title, notice);
                context.insert("index", index);
                self.render("index.html", &context)
            }
            FeedView::Trip(trip) => {
                let mut context = page_context(display, &trip.trip_name, notice);
                context.insert("trip", trip);
                context.insert("empty", &trip.is_empty());
                self.render("trip.html", &context)
            }
        }
    }

    /// Page shown instead of the feed when the backend can't be used
    pub fn error_page(&self, display: &DisplayConfig, err: &HttpError) -> ApiResult<Html<String>> {
        let mut context = page_context(display, &display.title, None);
        context.insert("message", err.message());
        context.insert(
            "unconfigured",
            &(err.status() == StatusCode::SERVICE_UNAVAILABLE),
        );
        context.insert("backend_env", anothersky_core::config::BACKEND_URL_ENV);
        self.render("error.html", &context)
    }

    fn render(&self, name: &str, context: &Context) -> ApiResult<Html<String>> {
        self.tera.render(name, context).map(Html).map_err(|err| {
            error!(error = ?err, template = name, "error rendering page");
            HttpError::from(err)
        })
    }
}

fn page_context(display: &DisplayConfig, title: &str, notice: Option<Notice>) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("theme", &display.theme.to_string());
    context.insert("link_previews", &display.link_previews);
    context.insert("notice", &notice.map(Notice::message));
    context
}

/// `path` with the non-empty `params` url encoded as its query string
pub(crate) fn href(path: &str, params: &[(&str, &str)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params.iter().filter(|(_, value)| !value.is_empty()) {
        query.append_pair(key, value);
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}

/// Template value as plain text, null being empty
fn plain(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

// tera's own escaping also encodes '/', which mangles every URL we emit,
// so values go through html-escape and are marked safe

struct Text;

impl Filter for Text {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::String(encode_text(&plain(value)).into_owned()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

struct Attr;

impl Filter for Attr {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::String(
            encode_double_quoted_attribute(&plain(value)).into_owned(),
        ))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// `2024-05-03` as `2024/05/03`
struct Day;

impl Filter for Day {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let raw = plain(value);
        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|err| tera::Error::msg(format!("`{raw}` is not a date: {err}")))?;
        Ok(Value::String(date.format(DAY_FORMAT).to_string()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// RFC 3339 instant as wall clock time in the display zone
struct LocalTime {
    zone: Tz,
}

impl Filter for LocalTime {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let raw = plain(value);
        let instant = DateTime::parse_from_rfc3339(&raw)
            .map_err(|err| tera::Error::msg(format!("`{raw}` is not an instant: {err}")))?;
        Ok(Value::String(
            instant
                .with_timezone(&self.zone)
                .format(LOCAL_TIME_FORMAT)
                .to_string(),
        ))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Link back to the feed page, `feed_href(trip_id=.., sort=.., date=..)`
struct FeedHref;

impl Function for FeedHref {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let param = |name: &str| args.get(name).map(plain).unwrap_or_default();
        let (trip_id, sort, date) = (param("trip_id"), param("sort"), param("date"));
        let href = href(
            "/",
            &[
                ("tripId", trip_id.as_ref()),
                ("sort", sort.as_ref()),
                ("date", date.as_ref()),
            ],
        );
        Ok(Value::String(
            encode_double_quoted_attribute(&href).into_owned(),
        ))
    }

    fn is_safe(&self) -> bool {
        true
    }
}
