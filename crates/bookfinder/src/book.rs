use std::fmt;

use serde::{
    de::{Deserializer, IgnoredAny},
    Deserialize,
};

/// One entry of the `docs` array returned by the search API.
///
/// Only the fields needed to draw a card are kept, every other field of the response is ignored.
/// All of them are optional, a missing `title` reads as an empty string. A field holding a value
/// of an unexpected type is read as missing so one odd entry never fails the whole response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BookResult {
    #[serde(default, deserialize_with = "text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "names")]
    author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    first_publish_year: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    cover_i: Option<Scalar>,
}

/// Either a value of the expected type or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Known(T),
    Unknown(IgnoredAny),
}

impl<T> Lenient<T> {
    #[allow(clippy::missing_const_for_fn)] // can't be const
    fn known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown(_) => None,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Lenient<T>>::deserialize(deserializer)?.and_then(Lenient::known))
}

/// Any scalar as text, `1984` reads as `"1984"`.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, Scalar>(deserializer)?.map(|s| s.to_string()))
}

/// An array of names, elements that are not scalars are skipped.
fn names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = lenient::<D, Vec<Lenient<Scalar>>>(deserializer)?;
    Ok(names.map(|names| {
        names
            .into_iter()
            .filter_map(Lenient::known)
            .map(|s| s.to_string())
            .collect()
    }))
}

/// A loosely typed JSON scalar, the API is not consistent about numbers vs strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A whole number such as `1965`.
    Integer(i64),
    /// Any other JSON number.
    Float(f64),
    /// A string value such as `"1965"`.
    Text(String),
}

impl Scalar {
    /// `0`, `NaN` and `""` carry no information and are treated like a missing field.
    fn is_blank(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 0,
            Self::Float(n) => *n == 0.0 || n.is_nan(),
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl BookResult {
    /// Creates a result with only a title, the other fields can be added with the `with_*`
    /// methods.
    #[must_use]
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the author names.
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author_name = Some(authors.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the year of first publication.
    #[must_use]
    pub fn with_year<Y: Into<Scalar>>(mut self, year: Y) -> Self {
        self.first_publish_year = Some(year.into());
        self
    }

    /// Sets the cover identifier.
    #[must_use]
    pub fn with_cover<C: Into<Scalar>>(mut self, cover: C) -> Self {
        self.cover_i = Some(cover.into());
        self
    }

    /// The title, empty when the API did not send one.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// The author names in the order given by the API, `None` when absent or empty.
    #[must_use]
    pub fn authors(&self) -> Option<&[String]> {
        self.author_name.as_deref().filter(|names| !names.is_empty())
    }

    /// The year of first publication.
    #[must_use]
    pub fn first_publish_year(&self) -> Option<&Scalar> {
        self.first_publish_year.as_ref().filter(|y| !y.is_blank())
    }

    /// The identifier of the cover image.
    #[must_use]
    pub fn cover_id(&self) -> Option<&Scalar> {
        self.cover_i.as_ref().filter(|c| !c.is_blank())
    }
}
