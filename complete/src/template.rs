//! Ordered-placeholder rendering for the static script templates.
//!
//! A placeholder is an uppercase name between `@@` markers, e.g.
//! `@@PROGRAM@@`. Any other `@@` sequence is kept as literal text.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(&'static str),
    Slot(&'static str),
}

/// A parsed template.
#[derive(Debug, Clone)]
pub(crate) struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub(crate) fn parse(source: &'static str) -> Self {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("@@") {
            let after = &rest[start + 2..];
            match after.find("@@") {
                Some(end) if is_slot_name(&after[..end]) => {
                    if start > 0 {
                        segments.push(Segment::Text(&rest[..start]));
                    }
                    segments.push(Segment::Slot(&after[..end]));
                    rest = &after[end + 2..];
                }
                _ => {
                    segments.push(Segment::Text(&rest[..start + 2]));
                    rest = after;
                }
            }
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }

        Self { segments }
    }

    /// Placeholder names in order of appearance (repeats included).
    #[cfg(test)]
    pub(crate) fn slots(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(name) => Some(*name),
            Segment::Text(_) => None,
        })
    }

    /// Appends the rendered template to `out`.
    ///
    /// A placeholder with no value renders as nothing.
    pub(crate) fn render_into(&self, out: &mut String, values: &[(&str, &str)]) {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(name) => {
                    if let Some((_, value)) = values.iter().find(|(key, _)| key == name) {
                        out.push_str(value);
                    }
                }
            }
        }
    }
}

fn is_slot_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
}
