//! Where the referenced stylesheet paths come from
//!
//! A source is a single path, a list of paths, or a resolver callback that
//! computes them from the file being transformed. Callbacks may answer
//! immediately or asynchronously; both are driven through the same boxed
//! future.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Stylesheet used when no source is given
pub const DEFAULT_CSS_FILE: &str = "./src/index.css";

/// One or more stylesheet paths produced by a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum References {
    One(String),
    Many(Vec<String>),
}

impl References {
    /// Flatten into the ordered list of paths
    pub fn into_paths(self) -> Vec<String> {
        match self {
            References::One(path) => vec![path],
            References::Many(paths) => paths,
        }
    }
}

impl From<String> for References {
    fn from(path: String) -> Self {
        References::One(path)
    }
}

impl From<&str> for References {
    fn from(path: &str) -> Self {
        References::One(path.to_string())
    }
}

impl From<Vec<String>> for References {
    fn from(paths: Vec<String>) -> Self {
        References::Many(paths)
    }
}

impl From<Vec<&str>> for References {
    fn from(paths: Vec<&str>) -> Self {
        References::Many(paths.into_iter().map(str::to_string).collect())
    }
}

/// Future returned by a resolver callback
pub type ResolveFuture = BoxFuture<'static, anyhow::Result<References>>;

/// Resolver callback over `(code, id)`
pub type ResolverFn = Arc<dyn Fn(&str, &str) -> ResolveFuture + Send + Sync>;

/// Source of the stylesheet paths to reference
#[derive(Clone)]
pub enum ReferenceSource {
    Literal(String),
    LiteralList(Vec<String>),
    Resolver(ResolverFn),
}

impl ReferenceSource {
    /// Wrap a synchronous callback
    pub fn sync<F, R>(f: F) -> Self
    where
        F: Fn(&str, &str) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<References> + 'static,
    {
        ReferenceSource::Resolver(Arc::new(move |code: &str, id: &str| -> ResolveFuture {
            let result: anyhow::Result<References> = f(code, id).map(Into::into);
            future::ready(result).boxed()
        }))
    }

    /// Wrap an asynchronous callback. The callback receives owned copies of
    /// `(code, id)` so the returned future can outlive the call.
    pub fn resolver<F, Fut, R>(f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<References> + 'static,
    {
        ReferenceSource::Resolver(Arc::new(move |code: &str, id: &str| -> ResolveFuture {
            f(code.to_string(), id.to_string())
                .map(|result: anyhow::Result<R>| -> anyhow::Result<References> {
                    result.map(Into::into)
                })
                .boxed()
        }))
    }

    /// Produce the ordered list of paths for one file
    pub async fn resolve(&self, code: &str, id: &str) -> anyhow::Result<Vec<String>> {
        match self {
            ReferenceSource::Literal(path) => Ok(vec![path.clone()]),
            ReferenceSource::LiteralList(paths) => Ok(paths.clone()),
            ReferenceSource::Resolver(f) => f(code, id).await.map(References::into_paths),
        }
    }
}

impl Default for ReferenceSource {
    fn default() -> Self {
        ReferenceSource::Literal(DEFAULT_CSS_FILE.to_string())
    }
}

impl From<&str> for ReferenceSource {
    fn from(path: &str) -> Self {
        ReferenceSource::Literal(path.to_string())
    }
}

impl From<String> for ReferenceSource {
    fn from(path: String) -> Self {
        ReferenceSource::Literal(path)
    }
}

impl From<Vec<String>> for ReferenceSource {
    fn from(paths: Vec<String>) -> Self {
        ReferenceSource::LiteralList(paths)
    }
}

impl From<Vec<&str>> for ReferenceSource {
    fn from(paths: Vec<&str>) -> Self {
        ReferenceSource::LiteralList(paths.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Debug for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSource::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            ReferenceSource::LiteralList(paths) => {
                f.debug_tuple("LiteralList").field(paths).finish()
            }
            ReferenceSource::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}
