//! XML namespaces used in PresentationML text markup

/// DrawingML main namespace
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// PresentationML main namespace
pub const P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
/// Relationships namespace
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Content Types namespace
pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
/// Package Relationships namespace
pub const PR: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
/// The `xml:` prefix, bound by definition
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Canonical prefix bindings for the namespaces this crate writes
const PREFIXES: &[(&str, &str)] = &[("a", A), ("p", P), ("r", R), ("xml", XML)];

/// Namespace URI bound to a canonical prefix
pub fn uri_for_prefix(prefix: &str) -> Option<&'static str> {
    PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

/// `xmlns:` declarations for the given canonical prefixes, in order.
///
/// Handy for building test markup:
/// `format!("<a:p {}/>", nsdecls(&["a"]))`.
pub fn nsdecls(prefixes: &[&str]) -> String {
    prefixes
        .iter()
        .filter_map(|p| uri_for_prefix(p).map(|uri| format!("xmlns:{}=\"{}\"", p, uri)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A namespaced element name with the prefix used when the element
/// has to be created and no binding for its namespace is in scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Canonical prefix
    pub prefix: &'static str,
    /// Namespace URI
    pub ns: &'static str,
    /// Local name
    pub local: &'static str,
}

impl Tag {
    /// DrawingML element (`a:`)
    pub const fn a(local: &'static str) -> Self {
        Self {
            prefix: "a",
            ns: A,
            local,
        }
    }

    /// PresentationML element (`p:`)
    pub const fn p(local: &'static str) -> Self {
        Self {
            prefix: "p",
            ns: P,
            local,
        }
    }

    /// Name using the canonical prefix, e.g. `a:pPr`
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.prefix, self.local)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// Split `prefix:local` into its parts
pub(crate) fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nsdecls() {
        assert_eq!(
            nsdecls(&["p", "a"]),
            format!("xmlns:p=\"{}\" xmlns:a=\"{}\"", P, A)
        );
        assert_eq!(nsdecls(&["nope"]), "");
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("a:pPr"), (Some("a"), "pPr"));
        assert_eq!(split_qname("Types"), (None, "Types"));
    }

    #[test]
    fn test_tag_qualified() {
        assert_eq!(Tag::a("bodyPr").qualified(), "a:bodyPr");
        assert_eq!(Tag::p("txBody").to_string(), "p:txBody");
    }
}
