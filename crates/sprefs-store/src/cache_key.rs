//! Canonical cache-key encoding.
//!
//! A cache key is a flat string of sections, one per scope:
//!
//! ```text
//! (folder:folder1:250px,blue,)(folder:folder2:100px,blue,)
//! ```
//!
//! Scope ids and values are escaped with `\` before any of `\ ( ) : ,` so
//! that a delimiter inside a value can never make two different states
//! encode to the same key.

/// Domain tag prepended to every digest computation.
const DIGEST_DOMAIN: &str = "sprefs-cache-key-v1";

/// Characters that carry structure in the key format.
const RESERVED: &[char] = &['\\', '(', ')', ':', ','];

/// Incrementally builds a cache key.
///
/// Layers append their own fragments to the key produced by the layer they
/// wrap, so a builder can be seeded with an existing prefix.
#[derive(Clone, Debug, Default)]
pub struct CacheKeyBuilder {
    buf: String,
}

impl CacheKeyBuilder {
    /// Start an empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-encoded key produced by a wrapped layer.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { buf: prefix.into() }
    }

    /// Append a single escaped field followed by `:`.
    pub fn field(&mut self, value: &str) -> &mut Self {
        push_escaped(&mut self.buf, value);
        self.buf.push(':');
        self
    }

    /// Append one scope section: `(<tag>:<scope>:<v0>,<v1>,...,)`.
    pub fn section<'a, I>(&mut self, tag: &str, scope: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.buf.push('(');
        self.buf.push_str(tag);
        self.buf.push(':');
        push_escaped(&mut self.buf, scope);
        self.buf.push(':');
        self.values(values);
        self.buf.push(')');
        self
    }

    /// Append a bare list of values, each followed by `,`.
    pub fn values<'a, I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for value in values {
            push_escaped(&mut self.buf, value);
            self.buf.push(',');
        }
        self
    }

    /// The key built so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the builder and return the key.
    pub fn finish(self) -> String {
        self.buf
    }
}

fn push_escaped(buf: &mut String, raw: &str) {
    for ch in raw.chars() {
        if RESERVED.contains(&ch) {
            buf.push('\\');
        }
        buf.push(ch);
    }
}

/// Fixed-length, hex-encoded BLAKE3 digest of a cache key.
///
/// Useful for consumers that need a bounded partition token; equal keys
/// always give equal digests.
pub fn cache_digest(key: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DIGEST_DOMAIN.as_bytes());
    hasher.update(b":");
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize().as_bytes())
}
