use crate::options::FormatOptions;

/// Markers prepended to the rendered currency text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoration {
    wrap: Option<String>,
    digitize: Option<String>,
}

impl Decoration {
    pub fn from_options(options: &FormatOptions) -> Self {
        Self {
            wrap: options.wrapped.then(|| options.wrapped_symbol.clone()),
            digitize: options.digitized.then(|| options.digitized_symbol.clone()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.wrap.is_some() || self.digitize.is_some()
    }

    /// Digitize marker goes on first, so the wrap marker ends up outermost
    ///
    /// # Examples
    /// ```
    /// use exch_number_format::FormatOptions;
    /// use exch_number_format::formatter::Decoration;
    ///
    /// let options = FormatOptions::default().wrapped().digitized();
    /// assert_eq!(Decoration::from_options(&options).apply("₿"), "wd₿");
    /// ```
    pub fn apply(&self, display: &str) -> String {
        let mut decorated = display.to_string();
        if let Some(marker) = &self.digitize {
            decorated.insert_str(0, marker);
        }
        if let Some(marker) = &self.wrap {
            decorated.insert_str(0, marker);
        }
        decorated
    }
}
