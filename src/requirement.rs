use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
#[cfg(feature = "serde")]
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

use winnow::combinator::{alt, eof, opt, terminated};
use winnow::token::literal;
use winnow::{PResult, Parser};

use crate::{parse_complete, version_body, FormatError, FormatErrorKind, FormatParseError, Version};

/// A version token as it appears inside a requirement, without any prefix.
const VERSION_PATTERN: &str = r"[0-9]+\.[0-9]+(?:\.[0-9]+)?(?:-[A-Za-z0-9_+-]+)?";

static TILDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"~({VERSION_PATTERN})")).expect("tilde pattern is valid"));
static CARET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\^({VERSION_PATTERN})")).expect("caret pattern is valid"));
static HYPHEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({VERSION_PATTERN})\s*-\s*({VERSION_PATTERN})"))
        .expect("hyphen pattern is valid")
});

/// Comparison performed by a [BaseClause].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `*`, matches every version.
    Any,
    /// `=1.2.3`
    Equal,
    /// `<1.2.3`
    Less,
    /// `>1.2.3`
    Greater,
    /// `<=1.2.3`
    LessEqual,
    /// `>=1.2.3`
    GreaterEqual,
}

impl Mode {
    pub fn symbol(self) -> &'static str {
        match self {
            Mode::Any => "*",
            Mode::Equal => "=",
            Mode::Less => "<",
            Mode::Greater => ">",
            Mode::LessEqual => "<=",
            Mode::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/**
A single comparison term: an operator and its version operand, or the
wildcard `*`.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseClause {
    mode: Mode,
    version: Option<Version>,
}

impl BaseClause {
    /// The `*` clause.
    pub fn any() -> Self {
        BaseClause {
            mode: Mode::Any,
            version: None,
        }
    }

    /// A comparison against `version`. [Mode::Any] drops the operand.
    pub fn new(mode: Mode, version: Version) -> Self {
        match mode {
            Mode::Any => BaseClause::any(),
            mode => BaseClause {
                mode,
                version: Some(version),
            },
        }
    }

    /// Parse one clause token such as `>=1.2.3`, `1.2` or `*`.
    ///
    /// A bare version means `=`.
    pub fn parse<S: AsRef<str>>(input: S) -> Result<BaseClause, FormatError> {
        parse_complete(input.as_ref(), clause)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The operand. `None` only for [Mode::Any].
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    // Every comparison asks the operand about the candidate, so clause
    // semantics stay tied to the ordering on Version.
    pub fn matches(&self, version: &Version) -> bool {
        let operand = match (&self.mode, &self.version) {
            (Mode::Any, _) => return true,
            (_, Some(operand)) => operand,
            (_, None) => return false,
        };

        match self.mode {
            Mode::Any => true,
            Mode::Equal => operand.same(version),
            Mode::Less => operand.greater_than(version),
            Mode::Greater => operand.less_than(version),
            Mode::LessEqual => operand.same(version) || operand.greater_than(version),
            Mode::GreaterEqual => operand.same(version) || operand.less_than(version),
        }
    }
}

impl fmt::Display for BaseClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) if self.mode != Mode::Any => write!(f, "{}{}", self.mode, version),
            _ => write!(f, "{}", Mode::Any),
        }
    }
}

impl std::str::FromStr for BaseClause {
    type Err = FormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseClause::parse(s)
    }
}

/// Node of a requirement's expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Clause(BaseClause),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Expr::Clause(clause) => clause.matches(version),
            Expr::And(left, right) => left.matches(version) && right.matches(version),
            Expr::Or(left, right) => left.matches(version) || right.matches(version),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Clause(clause) => write!(f, "{}", clause),
            Expr::And(left, right) => write!(f, "{} {}", left, right),
            Expr::Or(left, right) => write!(f, "{} || {}", left, right),
        }
    }
}

/**
A parsed requirement expression, e.g. `~1.2.5 || >=2.0.0 <2.4.0`.

Clauses separated by whitespace must all match; groups separated by `||`
are alternatives. Tilde, caret and hyphen shorthands are expanded into plain
comparisons when parsing.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Requirement {
    expr: Expr,
}

#[cfg(feature = "serde")]
impl Serialize for Requirement {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Requirement {
    /// A requirement satisfied by every version.
    pub fn any() -> Self {
        Requirement {
            expr: Expr::Clause(BaseClause::any()),
        }
    }

    /// Parse a requirement expression.
    ///
    /// ```rust
    /// use verreq::Requirement;
    ///
    /// let req = Requirement::parse("~1.2.5 || ^2.0.0").unwrap();
    /// assert_eq!(req.to_string(), ">=1.2.5 <1.3.0 || >=2.0.0 <3.0.0");
    /// ```
    pub fn parse<S: AsRef<str>>(input: S) -> Result<Requirement, FormatError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(FormatError::new(input, 0, FormatErrorKind::EmptyRequirement));
        }

        let rewritten = expand_shorthands(input)?;
        #[cfg(feature = "tracing")]
        tracing::trace!(input, rewritten = %rewritten, "expanded requirement shorthands");

        let mut segments = rewritten.split("||").map(|segment| -> Result<Expr, FormatError> {
            let mut tokens = segment.split_whitespace();
            let first = tokens.next().ok_or_else(|| {
                FormatError::new(rewritten.as_str(), 0, FormatErrorKind::EmptyRequirement)
            })?;
            let first = Expr::Clause(BaseClause::parse(first)?);
            tokens.try_fold(first, |agg, token| -> Result<Expr, FormatError> {
                let clause = Expr::Clause(BaseClause::parse(token)?);
                Ok(Expr::And(Box::new(agg), Box::new(clause)))
            })
        });

        // split always yields at least one segment
        let first = match segments.next() {
            Some(segment) => segment?,
            None => return Err(FormatError::new(input, 0, FormatErrorKind::EmptyRequirement)),
        };
        let expr = segments.try_fold(first, |agg, segment| -> Result<Expr, FormatError> {
            Ok(Expr::Or(Box::new(agg), Box::new(segment?)))
        })?;

        Ok(Requirement { expr })
    }

    /// Parses both strings and checks the version against the requirement.
    pub fn satisfied(requirement: &str, version: &str) -> Result<bool, FormatError> {
        Requirement::parse(requirement)?.matches_str(version)
    }

    /// The root of the expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.expr.matches(version)
    }

    /// Like [Requirement::matches], parsing `version` first.
    pub fn matches_str(&self, version: &str) -> Result<bool, FormatError> {
        Ok(self.matches(&Version::parse(version)?))
    }

    /// The highest of `versions` that satisfies this requirement.
    ///
    /// ```rust
    #[doc = include_str!("../demos/best.rs")]
    /// ```
    pub fn best<'v, I>(&self, versions: I) -> Option<&'v Version>
    where
        I: IntoIterator<Item = &'v Version>,
    {
        let mut sorted: Vec<&Version> = versions.into_iter().collect();
        sorted.sort_by(|a, b| Version::sort(b, a));

        let best = sorted.into_iter().find(|v| self.matches(v));
        #[cfg(feature = "tracing")]
        tracing::debug!(requirement = %self, best = ?best.map(|v| v.to_string()), "picked best version");
        best
    }

    /// [Requirement::best] over version strings. Every string must parse.
    pub fn best_str<I, S>(&self, versions: I) -> Result<Option<Version>, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = versions
            .into_iter()
            .map(Version::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.best(&parsed).cloned())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl std::str::FromStr for Requirement {
    type Err = FormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Requirement::parse(s)
    }
}

/// Rewrites `~V`, `^V` and `V1 - V2` into plain comparison clauses, in that
/// order.
fn expand_shorthands(input: &str) -> Result<String, FormatError> {
    let text = replace_all(&TILDE_RE, input, |caps| {
        let version = Version::parse(&caps[1])?;
        Ok(format!(">={} <{}", version.to_filled_string(0), version.tilde()))
    })?;
    let text = replace_all(&CARET_RE, &text, |caps| {
        let version = Version::parse(&caps[1])?;
        Ok(format!(">={} <{}", version.to_filled_string(0), version.caret()))
    })?;
    replace_all(&HYPHEN_RE, &text, |caps| {
        Ok(format!(">={} <={}", &caps[1], &caps[2]))
    })
}

/// `Regex::replace_all` with a fallible replacer.
fn replace_all<F>(re: &Regex, text: &str, mut replace: F) -> Result<String, FormatError>
where
    F: FnMut(&Captures<'_>) -> Result<String, FormatError>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replace(&caps)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

/// <clause> ::= "*" | <operator>? <version body>
fn clause<'s>(input: &mut &'s str) -> PResult<BaseClause, FormatParseError<&'s str>> {
    terminated(
        alt((
            literal("*").value(BaseClause::any()),
            (opt(operator), version_body)
                .map(|(mode, version)| BaseClause::new(mode.unwrap_or(Mode::Equal), version)),
        )),
        eof,
    )
    .context("requirement clause")
    .parse_next(input)
}

fn operator<'s>(input: &mut &'s str) -> PResult<Mode, FormatParseError<&'s str>> {
    alt((
        literal(">=").value(Mode::GreaterEqual),
        literal("<=").value(Mode::LessEqual),
        literal("=").value(Mode::Equal),
        literal("<").value(Mode::Less),
        literal(">").value(Mode::Greater),
    ))
    .parse_next(input)
}


#[cfg(feature = "serde")]
#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn requirement_serde() {
        let req = Requirement::parse("~1.2.5 || 3.0.0").unwrap();

        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, "\">=1.2.5 <1.3.0 || =3.0.0\"");
        let deserialized: Requirement = serde_json::from_str(&serialized).unwrap();

        assert_eq!(req, deserialized);
    }
}
