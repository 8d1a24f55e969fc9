use chrono_tz::Tz;

pub mod media_url;

pub const TOKYO: Tz = chrono_tz::Asia::Tokyo;
