//! Pipeline constants.
//!
//! The pipeline deliberately takes no flags, environment variables, or
//! config files; everything that could vary lives here.

// Upstream feed
pub const FEED_URL: &str = "https://www.sstm-sam.org.cn/sam/api/hp/aps";
pub const START_YEAR: i32 = 2021;
pub const LOOKAHEAD_YEARS: i32 = 1;

// Output artifact
pub const OUTPUT_FILE: &str = "astrocal.ics";
pub const CALENDAR_NAME: &str = "天象日历";
pub const CALENDAR_DESCRIPTION: &str = "自动抓取上海天文馆数据";

// Publishing
pub const COMMIT_MESSAGE: &str = "update";
