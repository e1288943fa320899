use std::fmt;

use winnow::combinator::separated;
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

use crate::locale::LocaleError;

/// A parsed language tag, reduced to the parts number formatting cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    /// Lower-case language subtag, e.g. `en`
    pub language: String,
    /// Title-case script subtag, e.g. `Latn`
    pub script: Option<String>,
    /// Upper-case region subtag, e.g. `US` or `419`
    pub region: Option<String>,
    /// Numbering system from a `-u-nu-` extension, e.g. `beng`
    pub numbering: Option<String>,
}

impl LocaleTag {
    /// Lookup keys from the most general to the most specific
    pub fn fallback_chain(&self) -> Vec<String> {
        let mut chain = vec![self.language.clone()];
        if let Some(script) = &self.script {
            chain.push(format!("{}-{}", self.language, script));
        }
        if let Some(region) = &self.region {
            chain.push(format!("{}-{}", self.language, region));
            if let Some(script) = &self.script {
                chain.push(format!("{}-{}-{}", self.language, script, region));
            }
        }
        chain
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        if let Some(numbering) = &self.numbering {
            write!(f, "-u-nu-{numbering}")?;
        }
        Ok(())
    }
}

/// Split a tag into its alphanumeric subtags, accepting `-` and `_` separators
fn subtags<'s>(input: &mut &'s str) -> ModalResult<Vec<&'s str>> {
    separated(
        1..,
        take_while(1..=8, |c: char| c.is_ascii_alphanumeric()),
        one_of(['-', '_']),
    )
    .parse_next(input)
}

fn is_alpha(subtag: &str) -> bool {
    subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_digit(subtag: &str) -> bool {
    subtag.bytes().all(|b| b.is_ascii_digit())
}

fn title_case(subtag: &str) -> String {
    let lower = subtag.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Parse a BCP 47 language tag such as `en-US`, `zh-Hant-TW` or `bn-u-nu-latn`
///
/// Variants are validated and skipped, private-use subtags after `x` are
/// ignored, and of the extensions only the `nu` keyword of `-u-` is kept.
///
/// # Examples
/// ```
/// use exch_number_format::parser::parse_locale_tag;
///
/// let tag = parse_locale_tag("pt_br").unwrap();
/// assert_eq!(tag.to_string(), "pt-BR");
/// ```
pub fn parse_locale_tag(input: &str) -> Result<LocaleTag, LocaleError> {
    let invalid = || LocaleError::InvalidTag(input.to_string());
    let parts = subtags.parse(input).map_err(|_| invalid())?;
    let mut parts = parts.into_iter().peekable();

    let language = match parts.next() {
        Some(lang) if is_alpha(lang) && matches!(lang.len(), 2 | 3 | 5..=8) => {
            lang.to_ascii_lowercase()
        }
        _ => return Err(invalid()),
    };

    let script = parts
        .next_if(|s| s.len() == 4 && is_alpha(s))
        .map(title_case);

    let region = parts
        .next_if(|s| (s.len() == 2 && is_alpha(s)) || (s.len() == 3 && is_digit(s)))
        .map(str::to_ascii_uppercase);

    // Variants: 5-8 alphanumerics, or 4 starting with a digit.
    while parts
        .next_if(|s| {
            s.len() >= 5 || (s.len() == 4 && s.as_bytes()[0].is_ascii_digit())
        })
        .is_some()
    {}

    let mut numbering = None;
    while let Some(singleton) = parts.next() {
        if singleton.len() != 1 {
            return Err(invalid());
        }
        let singleton = singleton.to_ascii_lowercase();
        if singleton == "x" {
            // Private use runs to the end of the tag.
            break;
        }

        let mut key: Option<String> = None;
        let mut extension_len = 0;
        while let Some(subtag) = parts.next_if(|s| s.len() >= 2) {
            extension_len += 1;
            let subtag = subtag.to_ascii_lowercase();
            if singleton != "u" {
                continue;
            }
            if subtag.len() == 2 {
                key = Some(subtag);
            } else if key.as_deref() == Some("nu") && numbering.is_none() {
                numbering = Some(subtag);
            }
        }
        if extension_len == 0 {
            return Err(invalid());
        }
    }

    Ok(LocaleTag {
        language,
        script,
        region,
        numbering,
    })
}
