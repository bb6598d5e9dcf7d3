//! Content-Security-Policy header values.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    ScriptSrc,
    ImgSrc,
    FrameSrc,
    ConnectSrc,
    StyleSrc,
    DefaultSrc,
    FrameAncestors,
}

impl Directive {
    pub fn as_str(self) -> &'static str {
        match self {
            Directive::ScriptSrc => "script-src",
            Directive::ImgSrc => "img-src",
            Directive::FrameSrc => "frame-src",
            Directive::ConnectSrc => "connect-src",
            Directive::StyleSrc => "style-src",
            Directive::DefaultSrc => "default-src",
            Directive::FrameAncestors => "frame-ancestors",
        }
    }
}

/// Ordered directives, each with its list of sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    directives: Vec<(Directive, Vec<String>)>,
}

impl Default for ContentSecurityPolicy {
    /// Same-origin everything, plus the captcha widget and web fonts. The
    /// client bundle is WebAssembly, hence `'wasm-unsafe-eval'`.
    fn default() -> Self {
        let directives = [
            (
                Directive::ScriptSrc,
                &[
                    "'self'",
                    "'wasm-unsafe-eval'",
                    "https://www.recaptcha.net/recaptcha/",
                    "https://www.gstatic.com/recaptcha/",
                ][..],
            ),
            (Directive::ImgSrc, &["'self'"][..]),
            (
                Directive::FrameSrc,
                &["'self'", "https://www.recaptcha.net/recaptcha/"][..],
            ),
            (
                Directive::ConnectSrc,
                &[
                    "'self'",
                    "https://fonts.googleapis.com/",
                    "https://fonts.gstatic.com/",
                ][..],
            ),
            (
                Directive::StyleSrc,
                &["'self'", "https://fonts.googleapis.com/"][..],
            ),
            (
                Directive::DefaultSrc,
                &["'self'", "https://fonts.gstatic.com/"][..],
            ),
            (Directive::FrameAncestors, &["'self'"][..]),
        ];
        Self {
            directives: directives
                .into_iter()
                .map(|(directive, sources)| {
                    (directive, sources.iter().map(ToString::to_string).collect())
                })
                .collect(),
        }
    }
}

impl ContentSecurityPolicy {
    /// Put `source` in front of the directive's sources, adding the directive
    /// at the end if it is missing.
    #[must_use]
    pub fn prepend(mut self, directive: Directive, source: impl Into<String>) -> Self {
        let source = source.into();
        match self.directives.iter_mut().find(|(d, _)| *d == directive) {
            Some((_, sources)) => sources.insert(0, source),
            None => self.directives.push((directive, vec![source])),
        }
        self
    }

    /// Policy for pages that load the game module, which evaluates generated
    /// code and draws from blob URLs.
    pub fn for_game() -> Self {
        Self::default()
            .prepend(Directive::ScriptSrc, "'unsafe-eval'")
            .prepend(Directive::ImgSrc, "blob:")
    }

    pub fn sources(&self, directive: Directive) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(d, _)| *d == directive)
            .map(|(_, sources)| sources.as_slice())
    }
}

impl fmt::Display for ContentSecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (directive, sources)) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {};", directive.as_str(), sources.join(" "))?;
        }
        Ok(())
    }
}
