//! Locale packs for component strings and date names
//!
//! A [`Locale`] is plain read-only configuration handed to a component at
//! construction. `en-US` and `zh-CN` are built in; further packs load from
//! TOML and are looked up through a fallback chain (`zh_CN` → `zh-CN` → `zh`
//! → `en-US`).
//!
//! ```toml
//! name = "fr-FR"
//!
//! [date]
//! months_short = ["janv.", "févr.", "mars", "avr.", "mai", "juin",
//!                 "juil.", "août", "sept.", "oct.", "nov.", "déc."]
//! months_long = ["janvier", "février", "mars", "avril", "mai", "juin",
//!                "juillet", "août", "septembre", "octobre", "novembre", "décembre"]
//! am = "AM"
//! pm = "PM"
//!
//! [date_picker]
//! date_placeholder = "Choisir une date"
//! # ...
//! ```

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::rc::Rc;

use crate::error::LocaleError;

/// Month and meridiem names used by date formatting
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DateLocale {
    pub months_short: Vec<String>,
    pub months_long: Vec<String>,
    pub am: String,
    pub pm: String,
}

impl DateLocale {
    /// Name of a 1-based month
    pub fn month_short(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.months_short.get(i as usize))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn month_long(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.months_long.get(i as usize))
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<(), LocaleError> {
        for (field, names) in [
            ("months_short", &self.months_short),
            ("months_long", &self.months_long),
        ] {
            if names.len() != 12 {
                return Err(LocaleError::MonthCount {
                    field,
                    found: names.len(),
                });
            }
            if names.iter().any(String::is_empty) {
                return Err(LocaleError::EmptyName(field));
            }
        }
        if self.am.is_empty() || self.pm.is_empty() || self.am == self.pm {
            return Err(LocaleError::Meridiem);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DatePickerLocale {
    pub date_placeholder: String,
    pub datetime_placeholder: String,
    pub start_date_placeholder: String,
    pub end_date_placeholder: String,
    pub start_datetime_placeholder: String,
    pub end_datetime_placeholder: String,
    pub clear: String,
    pub now: String,
    pub confirm: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InputNumberLocale {
    pub placeholder: String,
}

/// Every string a component may show, for one language
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Locale {
    pub name: String,
    pub date: DateLocale,
    pub date_picker: DatePickerLocale,
    pub input_number: InputNumberLocale,
}

impl Locale {
    pub fn en_us() -> Self {
        Self {
            name: "en-US".to_string(),
            date: DateLocale {
                months_short: strings(&[
                    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                    "Dec",
                ]),
                months_long: strings(&[
                    "January",
                    "February",
                    "March",
                    "April",
                    "May",
                    "June",
                    "July",
                    "August",
                    "September",
                    "October",
                    "November",
                    "December",
                ]),
                am: "AM".to_string(),
                pm: "PM".to_string(),
            },
            date_picker: DatePickerLocale {
                date_placeholder: "Select Date".to_string(),
                datetime_placeholder: "Select Date and Time".to_string(),
                start_date_placeholder: "Start Date".to_string(),
                end_date_placeholder: "End Date".to_string(),
                start_datetime_placeholder: "Start Date and Time".to_string(),
                end_datetime_placeholder: "End Date and Time".to_string(),
                clear: "Clear".to_string(),
                now: "Now".to_string(),
                confirm: "Confirm".to_string(),
            },
            input_number: InputNumberLocale {
                placeholder: "Please Input".to_string(),
            },
        }
    }

    pub fn zh_cn() -> Self {
        Self {
            name: "zh-CN".to_string(),
            date: DateLocale {
                months_short: strings(&[
                    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                    "12月",
                ]),
                months_long: strings(&[
                    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月",
                    "十一月", "十二月",
                ]),
                am: "上午".to_string(),
                pm: "下午".to_string(),
            },
            date_picker: DatePickerLocale {
                date_placeholder: "选择日期".to_string(),
                datetime_placeholder: "选择日期时间".to_string(),
                start_date_placeholder: "开始日期".to_string(),
                end_date_placeholder: "结束日期".to_string(),
                start_datetime_placeholder: "开始日期时间".to_string(),
                end_datetime_placeholder: "结束日期时间".to_string(),
                clear: "清除".to_string(),
                now: "此刻".to_string(),
                confirm: "确认".to_string(),
            },
            input_number: InputNumberLocale {
                placeholder: "请输入".to_string(),
            },
        }
    }

    /// Parse and validate a locale pack
    pub fn from_toml_str(src: &str) -> Result<Self, LocaleError> {
        let locale: Locale = toml::from_str(src)?;
        if locale.name.trim().is_empty() {
            return Err(LocaleError::MissingName);
        }
        locale.date.validate()?;
        Ok(locale)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Normalize locale identifiers (`en_US` → `en-US`)
pub fn normalize_locale(tag: &str) -> String {
    tag.trim().replace('_', "-")
}

/// Lookup order for a locale tag, ending with `en-US`
pub fn locale_fallback_chain(tag: &str) -> Vec<String> {
    let tag = normalize_locale(tag);
    let mut chain = Vec::with_capacity(3);
    if !tag.is_empty() {
        chain.push(tag.clone());
        if let Some(lang) = tag.split('-').next() {
            if !lang.is_empty() && lang != tag {
                chain.push(lang.to_string());
            }
        }
    }
    if !chain.iter().any(|t| t == "en-US") {
        chain.push("en-US".to_string());
    }
    chain
}

/// Known locale packs keyed by normalized tag
#[derive(Clone, Debug)]
pub struct LocaleRegistry {
    packs: FxHashMap<String, Rc<Locale>>,
}

impl LocaleRegistry {
    /// A registry holding the built-in packs
    pub fn new() -> Self {
        let mut registry = Self {
            packs: FxHashMap::default(),
        };
        registry.insert(Locale::en_us());
        registry.insert(Locale::zh_cn());
        registry
    }

    pub fn insert(&mut self, locale: Locale) {
        let tag = normalize_locale(&locale.name);
        tracing::debug!(%tag, "register locale");
        self.packs.insert(tag, Rc::new(locale));
    }

    /// Parse a TOML pack and register it under its own name
    pub fn load_toml(&mut self, src: &str) -> Result<Rc<Locale>, LocaleError> {
        let locale = Locale::from_toml_str(src)?;
        let tag = normalize_locale(&locale.name);
        self.insert(locale);
        self.packs
            .get(&tag)
            .cloned()
            .ok_or(LocaleError::MissingName)
    }

    /// Exact lookup without fallback
    pub fn get(&self, tag: &str) -> Option<Rc<Locale>> {
        self.packs.get(&normalize_locale(tag)).cloned()
    }

    /// Best pack for a tag, falling back to the language and then `en-US`
    pub fn resolve(&self, tag: &str) -> Rc<Locale> {
        locale_fallback_chain(tag)
            .iter()
            .find_map(|t| self.packs.get(t).cloned())
            .unwrap_or_else(|| Rc::new(Locale::en_us()))
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
