//! Language profiles and the syntax registry
//!
//! Each profile carries filename matchers, a two-tier keyword table,
//! comment delimiters, and a set of independently togglable highlight
//! features. The registry canonicalizes every keyword table once at
//! construction time; highlighting never re-validates them.

use thiserror::Error;

/// Fatal profile configuration error, detected at registry construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// Two entries in a profile's keyword table share the same token text.
    #[error("duplicate keyword in syntax table for {profile}: '{keyword}'")]
    DuplicateKeyword {
        profile: &'static str,
        keyword: String,
    },
}

/// Keyword classification tier.
///
/// Tier1 covers control-flow/statement keywords and operator tokens,
/// Tier2 covers type/constant-class keywords. Renderers display the two
/// tiers in distinct colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordTier {
    Tier1,
    Tier2,
}

/// One entry in a profile's keyword table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub tier: KeywordTier,
}

impl Keyword {
    const fn tier1(text: &'static str) -> Self {
        Self {
            text,
            tier: KeywordTier::Tier1,
        }
    }

    const fn tier2(text: &'static str) -> Self {
        Self {
            text,
            tier: KeywordTier::Tier2,
        }
    }
}

/// Filename pattern for profile selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Matches only the exact suffix from the last `.` of the filename.
    Extension(&'static str),
    /// Matches anywhere in the filename.
    Substring(&'static str),
}

/// Independently togglable highlight features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightFlags {
    pub numbers: bool,
    pub strings: bool,
    pub comments: bool,
    pub keywords: bool,
    /// Reserved: no scanning rule is wired up for operators yet.
    pub operators: bool,
    pub punctuation: bool,
}

impl HighlightFlags {
    /// The usual set for programming languages.
    const fn code() -> Self {
        Self {
            numbers: true,
            strings: true,
            comments: true,
            keywords: true,
            operators: false,
            punctuation: false,
        }
    }

    const fn none() -> Self {
        Self {
            numbers: false,
            strings: false,
            comments: false,
            keywords: false,
            operators: false,
            punctuation: false,
        }
    }
}

/// Per-language highlighting configuration.
///
/// Buffers hold an owned copy of their selected profile, so a profile is
/// plain clonable data with no registry back-reference.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// Display label, also used in error reports ("C", "Python", ...).
    pub name: &'static str,
    /// Ordered filename patterns; first match wins.
    pub matchers: Vec<Matcher>,
    /// Keyword table. Sorted and fixed up by [`SyntaxRegistry`] before use.
    pub keywords: Vec<Keyword>,
    pub case_sensitive_keywords: bool,
    /// `None` disables line comments for this language.
    pub line_comment_start: Option<&'static str>,
    pub block_comment_start: Option<&'static str>,
    pub block_comment_end: Option<&'static str>,
    pub flags: HighlightFlags,
}

// ============================================================================
// Builtin profile tables
// ============================================================================

// Keyword tables work from larger to smaller chunks during matching, so
// tokens sharing a prefix must be tested longer-first (`!=` before `!`,
// otherwise the `=` is left unhighlighted). The registry sorts each table
// and then reorders those prefix pairs; see `canonicalize_keywords`.

const C_KEYWORDS: &[Keyword] = &[
    Keyword::tier1("switch"),
    Keyword::tier1("if"),
    Keyword::tier1("while"),
    Keyword::tier1("for"),
    Keyword::tier1("break"),
    Keyword::tier1("continue"),
    Keyword::tier1("return"),
    Keyword::tier1("else"),
    Keyword::tier1("struct"),
    Keyword::tier1("union"),
    Keyword::tier1("typedef"),
    Keyword::tier1("static"),
    Keyword::tier1("enum"),
    Keyword::tier1("class"),
    Keyword::tier1("case"),
    Keyword::tier1("include"),
    Keyword::tier1("define"),
    Keyword::tier1("NULL"),
    Keyword::tier1("#include"),
    Keyword::tier1("#define"),
    Keyword::tier1("ifdef"),
    Keyword::tier1("#ifdef"),
    Keyword::tier1("#then"),
    Keyword::tier1("#"),
    Keyword::tier1("namespace"),
    Keyword::tier1("!"),
    Keyword::tier1("!="),
    Keyword::tier1("="),
    Keyword::tier1("<"),
    Keyword::tier1(">"),
    Keyword::tier1("->"),
    Keyword::tier1("<<"),
    Keyword::tier1(">>"),
    Keyword::tier1("=="),
    Keyword::tier1("&&"),
    Keyword::tier1("|"),
    Keyword::tier1("||"),
    Keyword::tier1("|="),
    Keyword::tier1("&"),
    Keyword::tier1("&="),
    Keyword::tier2("int"),
    Keyword::tier2("long"),
    Keyword::tier2("double"),
    Keyword::tier2("float"),
    Keyword::tier2("char"),
    Keyword::tier2("unsigned"),
    Keyword::tier2("signed"),
    Keyword::tier2("void"),
];

const PASCAL_KEYWORDS: &[Keyword] = &[
    Keyword::tier1("begin"),
    Keyword::tier1("end"),
    Keyword::tier1("if"),
    Keyword::tier1("then"),
    Keyword::tier1("else"),
    Keyword::tier1("goto"),
    Keyword::tier1("while"),
    Keyword::tier1("do"),
    Keyword::tier1("until"),
    Keyword::tier1("program"),
    Keyword::tier1("type"),
    Keyword::tier1("const"),
    Keyword::tier1("var"),
    Keyword::tier1("procedure"),
    Keyword::tier1("function"),
    Keyword::tier1("repeat"),
    Keyword::tier1("for"),
    Keyword::tier1("to"),
    Keyword::tier1("downto"),
    Keyword::tier1("unit"),
    Keyword::tier1("uses"),
    Keyword::tier1("with"),
    Keyword::tier1("interface"),
    Keyword::tier1("implementation"),
    Keyword::tier1("in"),
    Keyword::tier1("constructor"),
    Keyword::tier1("destructor"),
    Keyword::tier1("nil"),
    Keyword::tier1("exit"),
    Keyword::tier2("array"),
    Keyword::tier2("file"),
    Keyword::tier2("object"),
    Keyword::tier2("packed"),
    Keyword::tier2("label"),
    Keyword::tier2("record"),
    Keyword::tier2("set"),
    Keyword::tier2("string"),
    Keyword::tier2("integer"),
    Keyword::tier2("float"),
    Keyword::tier2("double"),
    Keyword::tier2("real"),
    Keyword::tier2("char"),
];

const PYTHON_KEYWORDS: &[Keyword] = &[
    Keyword::tier1("and"),
    Keyword::tier1("as"),
    Keyword::tier1("assert"),
    Keyword::tier1("break"),
    Keyword::tier1("class"),
    Keyword::tier1("continue"),
    Keyword::tier1("def"),
    Keyword::tier1("del"),
    Keyword::tier1("elif"),
    Keyword::tier1("else"),
    Keyword::tier1("except"),
    Keyword::tier1("False"),
    Keyword::tier1("finally"),
    Keyword::tier1("for"),
    Keyword::tier1("from"),
    Keyword::tier1("global"),
    Keyword::tier1("if"),
    Keyword::tier1("import"),
    Keyword::tier1("in"),
    Keyword::tier1("is"),
    Keyword::tier1("lambda"),
    Keyword::tier1("None"),
    Keyword::tier1("nonlocal"),
    Keyword::tier1("not"),
    Keyword::tier1("or"),
    Keyword::tier1("pass"),
    Keyword::tier1("raise"),
    Keyword::tier1("return"),
    Keyword::tier1("True"),
    Keyword::tier1("try"),
    Keyword::tier1("while"),
    Keyword::tier1("with"),
    Keyword::tier1("yield"),
    Keyword::tier2("int"),
    Keyword::tier2("float"),
    Keyword::tier2("complex"),
    Keyword::tier2("list"),
    Keyword::tier2("tuple"),
    Keyword::tier2("range"),
    Keyword::tier2("str"),
];

fn builtin_profiles() -> Vec<LanguageProfile> {
    vec![
        LanguageProfile {
            name: "C",
            matchers: vec![
                Matcher::Extension(".c"),
                Matcher::Extension(".h"),
                Matcher::Extension(".cpp"),
                Matcher::Extension(".C"),
                Matcher::Extension(".H"),
                Matcher::Extension(".CPP"),
            ],
            keywords: C_KEYWORDS.to_vec(),
            case_sensitive_keywords: true,
            line_comment_start: Some("//"),
            block_comment_start: Some("/*"),
            block_comment_end: Some("*/"),
            flags: HighlightFlags::code(),
        },
        LanguageProfile {
            name: "Pascal",
            matchers: vec![
                Matcher::Extension(".pas"),
                Matcher::Extension(".pp"),
                Matcher::Extension(".PAS"),
                Matcher::Extension(".PP"),
            ],
            keywords: PASCAL_KEYWORDS.to_vec(),
            case_sensitive_keywords: false,
            line_comment_start: Some("//"),
            block_comment_start: Some("{"),
            block_comment_end: Some("}"),
            flags: HighlightFlags::code(),
        },
        LanguageProfile {
            name: "Python",
            matchers: vec![Matcher::Extension(".py")],
            keywords: PYTHON_KEYWORDS.to_vec(),
            case_sensitive_keywords: true,
            line_comment_start: Some("#"),
            block_comment_start: None,
            block_comment_end: None,
            flags: HighlightFlags::code(),
        },
        LanguageProfile {
            name: "Markdown",
            matchers: vec![Matcher::Extension(".md"), Matcher::Extension(".MD")],
            keywords: Vec::new(),
            case_sensitive_keywords: false,
            line_comment_start: None,
            block_comment_start: None,
            block_comment_end: None,
            flags: HighlightFlags::none(),
        },
        LanguageProfile {
            name: "Text",
            matchers: vec![Matcher::Extension(".txt"), Matcher::Extension(".TXT")],
            keywords: Vec::new(),
            case_sensitive_keywords: false,
            line_comment_start: None,
            block_comment_start: None,
            block_comment_end: None,
            flags: HighlightFlags {
                numbers: true,
                punctuation: true,
                ..HighlightFlags::none()
            },
        },
    ]
}

// ============================================================================
// Registry
// ============================================================================

/// The language profile table, canonicalized and ready for matching.
#[derive(Debug)]
pub struct SyntaxRegistry {
    profiles: Vec<LanguageProfile>,
}

impl SyntaxRegistry {
    /// Build the registry from the builtin profile table.
    pub fn with_builtin_profiles() -> Result<Self, ProfileError> {
        Self::from_profiles(builtin_profiles())
    }

    /// Build a registry from arbitrary profiles, canonicalizing each
    /// non-empty keyword table.
    pub fn from_profiles(mut profiles: Vec<LanguageProfile>) -> Result<Self, ProfileError> {
        for profile in &mut profiles {
            if !profile.keywords.is_empty() {
                canonicalize_keywords(profile.name, &mut profile.keywords)?;
            }
        }
        tracing::debug!(profiles = profiles.len(), "syntax registry ready");
        Ok(Self { profiles })
    }

    pub fn profiles(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    /// Select the profile for a filename.
    ///
    /// Profiles are tried in table order, matchers in order; the first hit
    /// wins. An extension matcher is compared against the suffix from the
    /// last `.` of the filename, a substring matcher anywhere in it.
    /// `None` means plain-text mode: no highlighting.
    pub fn select_profile(&self, filename: &str) -> Option<&LanguageProfile> {
        let ext = filename.rfind('.').map(|pos| &filename[pos..]);

        for profile in &self.profiles {
            for matcher in &profile.matchers {
                let hit = match *matcher {
                    Matcher::Extension(suffix) => ext == Some(suffix),
                    Matcher::Substring(fragment) => filename.contains(fragment),
                };
                if hit {
                    tracing::debug!(filename, profile = profile.name, "profile selected");
                    return Some(profile);
                }
            }
        }
        tracing::debug!(filename, "no profile matched, plain-text mode");
        None
    }
}

/// Sort a keyword table and fix up prefix ordering.
///
/// After the byte-wise sort, adjacent pairs where one token is a strict
/// prefix of the next and exactly one character shorter are swapped until a
/// fixpoint, so the longer token is matched first. Prefix collisions with a
/// length difference of two or more (`<` vs `<<=`) are a known limitation
/// and stay in sorted order.
///
/// Exact duplicates are a fatal configuration error, reported with the
/// profile name and the offending token.
fn canonicalize_keywords(
    profile_name: &'static str,
    keywords: &mut Vec<Keyword>,
) -> Result<(), ProfileError> {
    keywords.sort_by(|a, b| a.text.cmp(b.text));

    let mut swapped = true;
    while swapped {
        swapped = false;
        for j in 0..keywords.len().saturating_sub(1) {
            let shorter = keywords[j].text;
            let longer = keywords[j + 1].text;
            if longer.len() == shorter.len() + 1 && longer.starts_with(shorter) {
                keywords.swap(j, j + 1);
                swapped = true;
            }
        }
    }

    for pair in keywords.windows(2) {
        if pair[0].text == pair[1].text {
            return Err(ProfileError::DuplicateKeyword {
                profile: profile_name,
                keyword: pair[0].text.to_string(),
            });
        }
    }
    Ok(())
}
