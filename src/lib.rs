#![doc = include_str!("../README.md")]

#[cfg(feature = "serde")]
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

use std::cmp::{self, Ordering};
use std::fmt::{self, Write};
use std::num::ParseIntError;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, eof, opt, preceded, terminated};
use winnow::error::{AddContext, ErrMode, ErrorKind, FromExternalError, ParserError};
use winnow::stream::Stream;
use winnow::token::{literal, take_while};
use winnow::{PResult, Parser};

pub use requirement::*;

mod requirement;

/// Largest integer accepted for a numeric version component.
///
/// This is JavaScript's
/// [MAX_SAFE_INTEGER](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number/MAX_SAFE_INTEGER),
/// which keeps derived range bounds (`minor + 1`, `major + 1`) far away from
/// `u64` overflow.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Maximum length of a single version or clause string.
pub const MAX_LENGTH: usize = 256;

/**
Version or requirement parsing error.

Holds the offending input together with the location of the failure and a
more specific [FormatErrorKind].
*/
#[derive(Debug, Clone, Error, Eq, PartialEq)]
#[error("{kind}")]
pub struct FormatError {
    input: String,
    span: SourceSpan,
    kind: FormatErrorKind,
}

impl Diagnostic for FormatError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind().code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.kind().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind().help()
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind().url()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.input)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(
            miette::LabeledSpan::new_with_span(Some("here".into()), *self.span()),
        )))
    }
}

impl FormatError {
    pub(crate) fn new(input: impl Into<String>, offset: usize, kind: FormatErrorKind) -> Self {
        Self {
            input: input.into(),
            span: (offset, 0).into(),
            kind,
        }
    }

    /// Returns the input that was given to the parser.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the SourceSpan of the error.
    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// Returns the (0-based) byte offset where the parsing error happened.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Returns the more specific [FormatErrorKind] for this error.
    pub fn kind(&self) -> &FormatErrorKind {
        &self.kind
    }

    /// Returns the (0-indexed) line and column number where the parsing error
    /// happened.
    pub fn location(&self) -> (usize, usize) {
        let offset = self.offset().min(self.input.len());
        let prefix = &self.input.as_bytes()[..offset];

        let line_number = bytecount::count(prefix, b'\n');

        // Start of the line holding the error is one past the last newline
        // before it.
        let line_begin = prefix
            .iter()
            .rev()
            .position(|&b| b == b'\n')
            .map(|pos| offset - pos)
            .unwrap_or(0);

        (line_number, offset - line_begin)
    }
}

/**
The specific kind of error that occurred. Usually wrapped in a [FormatError].
*/
#[derive(Debug, Clone, Error, Eq, PartialEq, Diagnostic)]
pub enum FormatErrorKind {
    /// Version and clause strings can't be longer than [MAX_LENGTH].
    #[error("Version string can't be longer than {} characters.", MAX_LENGTH)]
    #[diagnostic(code(verreq::too_long), url(docsrs))]
    MaxLengthError,

    /// The parser ran out of input before a version was complete.
    #[error("Incomplete input to version parser.")]
    #[diagnostic(code(verreq::incomplete_input), url(docsrs))]
    IncompleteInput,

    /**
    Numeric components (major, minor, patch) must be valid, parseable
    integers. This error occurs when Rust's own integer parsing failed.
    */
    #[error("Failed to parse an integer component of a version string: {0}")]
    #[diagnostic(code(verreq::parse_int_error), url(docsrs))]
    ParseIntError(ParseIntError),

    /// Numeric components are limited to [MAX_SAFE_INTEGER].
    #[error("Integer component of version string is larger than the safe maximum: {0}")]
    #[diagnostic(code(verreq::integer_too_large), url(docsrs))]
    MaxIntError(u64),

    #[error("Requirement expression has no clauses.")]
    #[diagnostic(
        code(verreq::empty_requirement),
        url(docsrs),
        help("Use `*` to accept any version. Every `||` needs a clause on both sides.")
    )]
    EmptyRequirement,

    /**
    This is a generic error that a certain component of the version or
    requirement string failed to parse.
    */
    #[error("Failed to parse {0}.")]
    #[diagnostic(code(verreq::parse_component_error), url(docsrs))]
    Context(&'static str),

    #[error("An unspecified error occurred.")]
    #[diagnostic(code(verreq::other), url(docsrs))]
    Other,
}

#[derive(Debug)]
pub(crate) struct FormatParseError<I> {
    pub(crate) input: I,
    pub(crate) context: Option<&'static str>,
    pub(crate) kind: Option<FormatErrorKind>,
}

impl<I: Clone + Stream> ParserError<I> for FormatParseError<I> {
    fn from_error_kind(input: &I, _kind: ErrorKind) -> Self {
        Self {
            input: input.clone(),
            context: None,
            kind: None,
        }
    }

    fn append(self, input: &I, _token_start: &<I as Stream>::Checkpoint, _kind: ErrorKind) -> Self {
        Self {
            input: input.clone(),
            context: self.context,
            kind: self.kind,
        }
    }
}

impl<I: Stream> AddContext<I> for FormatParseError<I> {
    fn add_context(
        self,
        _input: &I,
        _token_start: &<I as Stream>::Checkpoint,
        ctx: &'static str,
    ) -> Self {
        Self {
            input: self.input,
            context: Some(ctx),
            kind: self.kind,
        }
    }
}

impl<'a> FromExternalError<&'a str, FormatParseError<&'a str>> for FormatParseError<&'a str> {
    fn from_external_error(_input: &&'a str, _kind: ErrorKind, e: FormatParseError<&'a str>) -> Self {
        e
    }
}

/// Runs `parser` over the whole of `original`, turning winnow's error into a
/// [FormatError] located inside `original`.
pub(crate) fn parse_complete<'s, O, P>(original: &'s str, mut parser: P) -> Result<O, FormatError>
where
    P: Parser<&'s str, O, FormatParseError<&'s str>>,
{
    if original.len() > MAX_LENGTH {
        return Err(FormatError::new(
            original,
            original.len() - 1,
            FormatErrorKind::MaxLengthError,
        ));
    }

    let mut input = original;
    match parser.parse_next(&mut input) {
        Ok(arg) => Ok(arg),
        Err(ErrMode::Backtrack(e)) | Err(ErrMode::Cut(e)) => {
            let offset = e.input.as_ptr() as usize - original.as_ptr() as usize;
            let kind = if let Some(kind) = e.kind {
                kind
            } else if let Some(ctx) = e.context {
                FormatErrorKind::Context(ctx)
            } else {
                FormatErrorKind::Other
            };
            Err(FormatError::new(original, offset, kind))
        }
        Err(ErrMode::Incomplete(_)) => Err(FormatError::new(
            original,
            original.len().saturating_sub(1),
            FormatErrorKind::IncompleteInput,
        )),
    }
}

/**
A version value: `major.minor[.patch][-candidate]`.

Minor and patch may be unspecified. An unspecified component is not the same
as zero: it sorts above every concrete value and is left out of the canonical
string form.
*/
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    candidate: Option<String>,
}

#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Version {
    /// Builds a version from its parts. An empty candidate counts as none.
    pub fn new(major: u64, minor: Option<u64>, patch: Option<u64>, candidate: Option<String>) -> Self {
        Version {
            major,
            minor,
            patch,
            candidate: candidate.filter(|c| !c.is_empty()),
        }
    }

    /// Parse a version string into a [Version].
    ///
    /// A single leading `v`, `^`, `~`, `>=`, `<=`, `>` or `<` is accepted and
    /// ignored.
    ///
    /// ```rust
    /// use verreq::Version;
    ///
    /// let v = Version::parse("v1.2-alpha").unwrap();
    /// assert_eq!(v.minor(), Some(2));
    /// assert_eq!(v.patch(), None);
    /// assert_eq!(v.to_string(), "1.2-alpha");
    /// ```
    pub fn parse<S: AsRef<str>>(input: S) -> Result<Version, FormatError> {
        parse_complete(input.as_ref(), version)
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// The pre-release label, e.g. `alpha` in `1.0.0-alpha`.
    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    /// True if this [Version] carries a candidate tag.
    pub fn is_candidate(&self) -> bool {
        self.candidate.is_some()
    }

    /// Canonical string form with unspecified minor/patch replaced by `fill`.
    ///
    /// ```rust
    /// use verreq::Version;
    ///
    /// let v = Version::parse("1.4").unwrap();
    /// assert_eq!(v.to_filled_string(0), "1.4.0");
    /// assert_eq!(v.to_string(), "1.4");
    /// ```
    pub fn to_filled_string(&self, fill: u64) -> String {
        let mut out = String::new();
        // Writing into a String can't fail.
        let _ = self.write_filled(&mut out, Some(fill));
        out
    }

    fn write_filled<W: Write>(&self, w: &mut W, fill: Option<u64>) -> fmt::Result {
        write!(w, "{}", self.major)?;
        if let Some(minor) = self.minor.or(fill) {
            write!(w, ".{}", minor)?;
        }
        if let Some(patch) = self.patch.or(fill) {
            write!(w, ".{}", patch)?;
        }
        if let Some(candidate) = &self.candidate {
            write!(w, "-{}", candidate)?;
        }
        Ok(())
    }

    /// Exclusive upper bound of a tilde range: `major.(minor + 1).0`.
    pub fn tilde(&self) -> String {
        let minor = self.minor.unwrap_or(0).saturating_add(1);
        Version::new(self.major, Some(minor), None, None).to_filled_string(0)
    }

    /// Exclusive upper bound of a caret range: `(major + 1).0.0`.
    pub fn caret(&self) -> String {
        Version::new(self.major.saturating_add(1), None, None, None).to_filled_string(0)
    }

    pub fn less_than(&self, other: &Version) -> bool {
        self.cmp(other) == Ordering::Less
    }

    pub fn greater_than(&self, other: &Version) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Numeric equality with unspecified components read as zero. The
    /// candidate tag is ignored.
    pub fn equal(&self, other: &Version) -> bool {
        self.major == other.major
            && self.minor.unwrap_or(0) == other.minor.unwrap_or(0)
            && self.patch.unwrap_or(0) == other.patch.unwrap_or(0)
    }

    /// [Version::equal] plus an identical candidate tag.
    pub fn same(&self, other: &Version) -> bool {
        self.equal(other) && self.candidate == other.candidate
    }

    /// Comparator for `sort_by`: the total order of [Ord] for [Version].
    ///
    /// ```rust
    /// use verreq::Version;
    ///
    /// let mut versions: Vec<Version> = ["1.1", "1.0.0-beta", "1.0.0"]
    ///     .iter()
    ///     .map(|s| Version::parse(s).unwrap())
    ///     .collect();
    /// versions.sort_by(Version::sort);
    /// let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
    /// assert_eq!(sorted, ["1.0.0-beta", "1.0.0", "1.1"]);
    /// ```
    pub fn sort(a: &Version, b: &Version) -> Ordering {
        a.cmp(b)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_filled(f, None)
    }
}

impl std::str::FromStr for Version {
    type Err = FormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl From<(u64, u64, u64)> for Version {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Version::new(major, Some(minor), Some(patch), None)
    }
}

impl From<(u64, u64)> for Version {
    fn from((major, minor): (u64, u64)) -> Self {
        Version::new(major, Some(minor), None, None)
    }
}

/// Unspecified components sort above every concrete value.
fn cmp_component(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

impl cmp::PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::Ord for Version {
    fn cmp(&self, other: &Version) -> cmp::Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => {}
            order_result => return order_result,
        }

        match cmp_component(self.minor, other.minor) {
            Ordering::Equal => {}
            order_result => return order_result,
        }

        match cmp_component(self.patch, other.patch) {
            Ordering::Equal => {}
            order_result => return order_result,
        }

        match (&self.candidate, &other.candidate) {
            (None, None) => Ordering::Equal,
            // a release sorts above its own candidates
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

/// <version> ::= <prefix>? <version body>
fn version<'s>(input: &mut &'s str) -> PResult<Version, FormatParseError<&'s str>> {
    terminated(preceded(opt(prefix), version_body), eof)
        .context("version")
        .parse_next(input)
}

fn prefix<'s>(input: &mut &'s str) -> PResult<&'s str, FormatParseError<&'s str>> {
    alt((
        literal("v"),
        literal("^"),
        literal("~"),
        literal(">="),
        literal("<="),
        literal(">"),
        literal("<"),
    ))
    .parse_next(input)
}

/// <version body> ::= <major> "." <minor> ("." <patch>)? ("-" <candidate>)?
pub(crate) fn version_body<'s>(input: &mut &'s str) -> PResult<Version, FormatParseError<&'s str>> {
    (
        number,
        literal("."),
        number,
        opt(preceded(literal("."), cut_err(number))),
        opt(preceded(literal("-"), candidate)),
    )
        .map(|(major, _, minor, patch, candidate)| {
            Version::new(major, Some(minor), patch, candidate)
        })
        .context("version body")
        .parse_next(input)
}

fn candidate<'s>(input: &mut &'s str) -> PResult<String, FormatParseError<&'s str>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '+' || c == '-'
    })
    .map(str::to_string)
    .context("candidate tag")
    .parse_next(input)
}

pub(crate) fn number<'s>(input: &mut &'s str) -> PResult<u64, FormatParseError<&'s str>> {
    let start = *input;

    digit1
        .try_map(|raw: &str| -> Result<u64, FormatParseError<&'s str>> {
            let value = raw.parse::<u64>().map_err(|e| FormatParseError {
                input: start,
                context: None,
                kind: Some(FormatErrorKind::ParseIntError(e)),
            })?;

            if value > MAX_SAFE_INTEGER {
                return Err(FormatParseError {
                    input: start,
                    context: None,
                    kind: Some(FormatErrorKind::MaxIntError(value)),
                });
            }

            Ok(value)
        })
        .context("number component")
        .parse_next(input)
}

/// True if `version` satisfies `requirement`.
///
/// ```rust
/// assert!(verreq::matches("^1.2.5", "1.3.1").unwrap());
/// assert!(!verreq::matches("1.2.5 - 1.3.0", "1.3.3").unwrap());
/// ```
pub fn matches(requirement: &str, version: &str) -> Result<bool, FormatError> {
    Requirement::satisfied(requirement, version)
}

/// Canonical form of the highest candidate that satisfies `requirement`.
///
/// Every candidate must parse. Returns `None` when nothing matches.
///
/// ```rust
#[doc = include_str!("../demos/pick.rs")]
/// ```
pub fn pick<I, S>(requirement: &str, versions: I) -> Result<Option<String>, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let requirement = Requirement::parse(requirement)?;
    let best = requirement.best_str(versions)?;
    Ok(best.map(|v| v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn trivial_version_number() {
        assert_eq!(v("1.2.34"), Version::new(1, Some(2), Some(34), None));
    }

    #[test]
    fn two_component_version_leaves_patch_unspecified() {
        let parsed = v("1.2");
        assert_eq!(parsed.major(), 1);
        assert_eq!(parsed.minor(), Some(2));
        assert_eq!(parsed.patch(), None);
        assert_eq!(parsed.candidate(), None);
    }

    #[test]
    fn version_with_candidate() {
        let parsed = v("1.2.3-alpha");
        assert_eq!(parsed.candidate(), Some("alpha"));
        assert!(parsed.is_candidate());
        assert_eq!(
            v("1.2-rc_1+build-7"),
            Version::new(1, Some(2), None, Some("rc_1+build-7".into()))
        );
    }

    #[test]
    fn prefixes_are_ignored() {
        for input in ["v1.2.3", "^1.2.3", "~1.2.3", ">=1.2.3", "<=1.2.3", ">1.2.3", "<1.2.3"] {
            assert_eq!(v(input), Version::from((1, 2, 3)), "{}", input);
        }
    }

    #[test]
    fn parsed_versions_match_loose_equality() {
        assert!(v("v1.2").same(&(1, 2, 0).into()));
        assert!(v("v1.2.3").same(&(1, 2, 3).into()));
        assert!(v("1.2").same(&(1, 2, 0).into()));
        assert!(v("1.2.3").same(&(1, 2, 3).into()));
        assert!(v("v1.2-alpha").same(&Version::new(1, Some(2), Some(0), Some("alpha".into()))));
        assert!(v("1.2.3-alpha").same(&Version::new(1, Some(2), Some(3), Some("alpha".into()))));
    }

    #[test]
    fn invalid_versions_are_rejected() {
        for input in ["test", "-1.2.0", "1.-2.0", "1", "1.2.", "1.2.3-", "v 1.2.3", "1.2.3.4", ""] {
            assert!(Version::parse(input).is_err(), "{} should not parse", input);
        }
    }

    #[test]
    fn error_carries_input_and_offset() {
        let err = Version::parse("1.2.3 x").unwrap_err();
        assert_eq!(err.input(), "1.2.3 x");
        assert_eq!(err.offset(), 5);
        assert_eq!(err.location(), (0, 5));
        assert_eq!(err.kind(), &FormatErrorKind::Context("version"));
        assert_eq!(err.to_string(), "Failed to parse version.");
    }

    #[test]
    fn individual_version_component_has_an_upper_bound() {
        let out_of_range = MAX_SAFE_INTEGER + 1;
        let err = Version::parse(format!("1.2.{}", out_of_range)).unwrap_err();
        assert_eq!(err.kind(), &FormatErrorKind::MaxIntError(out_of_range));
        assert_eq!(err.offset(), 4);

        let err = Version::parse("1.99999999999999999999").unwrap_err();
        assert!(matches!(err.kind(), FormatErrorKind::ParseIntError(_)));
    }

    #[test]
    fn version_string_limited_to_max_length() {
        let candidate = "x".repeat(MAX_LENGTH);
        let err = Version::parse(format!("1.1.1-{}", candidate)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Version string can't be longer than 256 characters."
        );

        let ok = format!("1.1.1-{}", &candidate[..MAX_LENGTH - 6]);
        assert!(Version::parse(ok).is_ok());
    }

    #[test]
    fn canonical_string_form() {
        assert_eq!(v("1.0").to_string(), "1.0");
        assert_eq!(v("v1.0").to_string(), "1.0");
        assert_eq!(v("1.2.3").to_string(), "1.2.3");
        assert_eq!(v("v1.2.3").to_string(), "1.2.3");
        assert_eq!(v("1.2.3-pre").to_string(), "1.2.3-pre");
        assert_eq!(v("v1.2.3-pre").to_string(), "1.2.3-pre");
        assert_eq!(Version::from((1, 0, 0)).to_string(), "1.0.0");
        assert_eq!(Version::new(3, None, None, None).to_string(), "3");
    }

    #[test]
    fn filled_string_form() {
        assert_eq!(v("1.0").to_filled_string(0), "1.0.0");
        assert_eq!(v("1.2-beta").to_filled_string(0), "1.2.0-beta");
        assert_eq!(v("1.2.3").to_filled_string(9), "1.2.3");
        assert_eq!(Version::new(4, None, None, None).to_filled_string(0), "4.0.0");
    }

    #[test]
    fn derived_bounds() {
        assert_eq!(v("1.2.5").tilde(), "1.3.0");
        assert_eq!(v("1.2").tilde(), "1.3.0");
        assert_eq!(v("1.2.5").caret(), "2.0.0");
        assert_eq!(v("0.9.1-pre").caret(), "1.0.0");
        assert_eq!(Version::new(7, None, None, None).tilde(), "7.1.0");
    }

    #[test]
    fn sort_order() {
        let sort = |a: &str, b: &str| Version::sort(&v(a), &v(b));
        assert_eq!(sort("2.0", "2.0"), Ordering::Equal);
        assert_eq!(sort("1.0", "2.0"), Ordering::Less);
        assert_eq!(sort("2.0", "1.0"), Ordering::Greater);
        assert_eq!(sort("1.0", "1.1"), Ordering::Less);
        assert_eq!(sort("1.1", "1.0"), Ordering::Greater);
        assert_eq!(sort("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(sort("1.0.0", "1.0.1"), Ordering::Less);
        assert_eq!(sort("1.0.1", "1.0.0"), Ordering::Greater);
        assert_eq!(sort("1.0.0-pre", "1.0.0-pre"), Ordering::Equal);
        assert_eq!(sort("1.0.0-alpha", "1.0.0-beta"), Ordering::Less);
        assert_eq!(sort("1.0.0-beta", "1.0.0-alpha"), Ordering::Greater);
    }

    #[test]
    fn comparisons() {
        assert!(v("2.0").equal(&v("2.0")));
        assert!(v("2.0").same(&v("2.0")));
        assert!(v("1.0").less_than(&v("2.0")));
        assert!(!v("2.0").less_than(&v("1.0")));
        assert!(v("2.0").greater_than(&v("1.0")));
        assert!(!v("1.0").greater_than(&v("2.0")));
        assert!(v("1.0").less_than(&v("1.1")));
        assert!(v("1.0.0").less_than(&v("1.0.1")));
        assert!(v("1.0.1").greater_than(&v("1.0.0")));

        assert!(v("1.0.0-pre").same(&v("1.0.0-pre")));
        assert!(v("1.0.0-pre").equal(&v("1.0.0-pre")));
        assert!(!v("1.0.0-alpha").same(&v("1.0.0-beta")));
        assert!(v("1.0.0-alpha").equal(&v("1.0.0-beta")));
        assert!(v("1.0.0-alpha").less_than(&v("1.0.0-beta")));
        assert!(v("1.0.0-beta").greater_than(&v("1.0.0-alpha")));
    }

    #[test]
    fn candidates_sort_below_their_release() {
        assert!(v("1.0.0-beta").less_than(&v("1.0.0")));
        assert!(!v("1.0.0").less_than(&v("1.0.0-beta")));
        assert!(v("1.0.0-beta").less_than(&v("2.0.0")));
        assert!(v("1.0.0").less_than(&v("2.0.0-beta")));
        assert!(v("1.0.1").greater_than(&v("1.0.1-beta")));
        assert!(v("1.0.1").greater_than(&v("1.0.0-beta")));
    }

    #[test]
    fn unspecified_components_sort_high() {
        assert!(!v("1.2").less_than(&v("1.2.1")));
        assert!(v("1.2").greater_than(&v("1.2.1")));
        assert!(v("1.2.0").less_than(&v("1.2.1")));
        assert!(Version::new(1, None, None, None).greater_than(&v("1.99.99")));
        assert!(v("1.2").less_than(&v("1.3.0")));
        // loose equality still reads the missing patch as zero
        assert!(v("1.2").same(&v("1.2.0")));
    }

    #[test]
    fn trichotomy_holds() {
        let inputs = [
            "0.1.0", "1.0.0", "1.0.0-alpha", "1.0.0-beta", "1.0.1", "1.10.0", "2.0.0-rc1",
            "2.0.0",
        ];
        for a in inputs.iter().map(|s| v(s)) {
            for b in inputs.iter().map(|s| v(s)) {
                let held = [a.less_than(&b), a.greater_than(&b), a.same(&b)]
                    .iter()
                    .filter(|x| **x)
                    .count();
                assert_eq!(held, 1, "{} vs {}", a, b);
                assert_eq!(Version::sort(&a, &b), Version::sort(&b, &a).reverse());
            }
        }
    }

    #[test]
    fn facade_matches() {
        assert!(!matches("^1.2.5", "1.2.3").unwrap());
        assert!(matches("^1.2.5", "1.3.1").unwrap());
        assert!(!matches("1.2.5 - 1.3.0", "1.3.3").unwrap());
        assert!(matches("^1.2.5-pre1", "1.2.5-pre2").unwrap());
        assert!(matches("nope", "1.0.0").is_err());
        assert!(matches("*", "nope").is_err());
    }

    #[test]
    fn facade_pick() {
        assert_eq!(
            pick(">=1.2.5", ["1.0.0", "1.2.5", "2.0.0"]).unwrap(),
            Some("2.0.0".to_string())
        );
        assert_eq!(pick(">=5.0.0", ["1.0.0", "1.2.5"]).unwrap(), None);
        assert_eq!(pick("*", Vec::<String>::new()).unwrap(), None);
        assert_eq!(pick("~1.2", ["1.2.0", "v1.2.9", "1.3"]).unwrap(), Some("1.2.9".to_string()));
        assert!(pick("*", ["1.0.0", "bogus"]).is_err());
    }
}

#[cfg(feature = "serde")]
#[cfg(test)]
mod serde_tests {
    use super::*;

    #[test]
    fn version_serde() {
        let v = Version::new(1, Some(2), None, Some("beta".into()));

        let serialized = serde_json::to_string(&v).unwrap();
        assert_eq!(serialized, "\"1.2-beta\"");
        let deserialized: Version = serde_json::from_str(&serialized).unwrap();

        assert_eq!(v, deserialized);
    }
}
