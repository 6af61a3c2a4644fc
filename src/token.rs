//! Injection tokens identifying bindable exchange points.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_OPAQUE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Token`].
///
/// Two tokens name the same binding iff their ids are equal.
///
/// - **Type**: derived from a constructible type, stable for the process lifetime
/// - **Named**: an explicit id chosen by the caller
/// - **Opaque**: allocated from a process-wide counter for bare tokens
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenId {
    /// Identity of a constructible type
    Type(TypeId),
    /// Explicit caller-chosen id
    Named(Arc<str>),
    /// Unique id of a bare token
    Opaque(u64),
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenId::Type(id) => write!(f, "type:{:?}", id),
            TokenId::Named(name) => write!(f, "named:{}", name),
            TokenId::Opaque(n) => write!(f, "opaque:{}", n),
        }
    }
}

/// Token to be exchanged for a value when injected.
///
/// Equality and hashing look at the id only; descriptions exist for
/// humans and error messages.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::Token;
///
/// struct Database;
///
/// // Bare tokens are unique even with identical descriptions
/// assert_ne!(Token::new("config"), Token::new("config"));
///
/// // Explicit ids compare by id
/// assert_eq!(Token::with_id("db.url", "a"), Token::with_id("db.url", "b"));
///
/// // Type-derived tokens are stable
/// assert_eq!(Token::of::<Database>(), Token::of::<Database>());
/// assert_eq!(Token::of::<Database>().description(), "Database");
/// ```
#[derive(Clone)]
pub struct Token {
    id: TokenId,
    description: Arc<str>,
}

impl Token {
    /// Creates a bare token with a fresh opaque id.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: TokenId::Opaque(NEXT_OPAQUE_ID.fetch_add(1, Ordering::Relaxed)),
            description: description.into().into(),
        }
    }

    /// Creates a token with an explicit id.
    ///
    /// An empty id produces a token that [`is_valid`](Self::is_valid)
    /// rejects.
    pub fn with_id(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: TokenId::Named(id.into().into()),
            description: description.into().into(),
        }
    }

    /// Token derived from the identity of type `T`.
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self::for_type(TypeId::of::<T>(), short_type_name(std::any::type_name::<T>()))
    }

    pub(crate) fn for_type(type_id: TypeId, name: &str) -> Self {
        Self {
            id: TokenId::Type(type_id),
            description: name.into(),
        }
    }

    /// The identity of this token.
    #[inline]
    pub fn id(&self) -> &TokenId {
        &self.id
    }

    /// Human-readable description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this token can identify a binding at all.
    pub fn is_valid(&self) -> bool {
        match &self.id {
            TokenId::Named(name) => !name.is_empty(),
            TokenId::Type(_) | TokenId::Opaque(_) => true,
        }
    }
}

impl PartialEq for Token {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("id", &self.id)
            .field("description", &&*self.description)
            .finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Strips the module path from a `type_name`, keeping generic arguments.
///
/// `app::services::Repo<app::User>` becomes `Repo<app::User>`. Tuple and
/// array names are kept whole.
pub(crate) fn short_type_name(full: &str) -> &str {
    if full.starts_with('(') || full.starts_with('[') {
        return full;
    }
    let head = full.find('<').unwrap_or(full.len());
    match full[..head].rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
