use std::fmt;

/// Path values captured by `:name` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Route path such as `/owner/properties/:id/edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Path segments without query, fragment and empty parts, so `/a/` and `/a` match alike.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|segment| !segment.is_empty())
}

impl Pattern {
    pub fn parse(path: &str) -> Self {
        let segments = segments(path)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Literal(segment.to_owned()),
            })
            .collect();
        Self {
            raw: path.to_owned(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Vec::new();
        let mut parts = segments(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.push((name.clone(), part.to_owned())),
            }
        }
        if parts.next().is_some() {
            return None;
        }

        Some(Params(params))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_match_ignores_trailing_slash_and_query() {
        let pattern = Pattern::parse("/owner/bookings");
        assert!(pattern.matches("/owner/bookings").is_some());
        assert!(pattern.matches("/owner/bookings/").is_some());
        assert!(pattern.matches("/owner/bookings?status=Pending").is_some());
        assert!(pattern.matches("/owner/bookings/1").is_none());
        assert!(pattern.matches("/owner").is_none());
    }

    #[test]
    fn params_are_captured() {
        let pattern = Pattern::parse("/tenant/bookings/create/:propertyId");
        let params = pattern.matches("/tenant/bookings/create/p-42").unwrap();
        assert_eq!(params.get("propertyId"), Some("p-42"));
        assert_eq!(params.get("id"), None);
    }

    #[test]
    fn root_matches_only_root() {
        let pattern = Pattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/properties").is_none());
    }
}
