/// Extract the canonical group label from a serialized group attribute.
///
/// Reports serialize the attribute in several forms: `A;x=1`, `"A;x=1"`,
/// `group=A;x=1` or `group="A;x=1"`. Surrounding quotes and the `attribute=`
/// prefix are dropped, then the value is split on `delimiter` and the first
/// field is the label. Returns `None` when that field is empty.
#[must_use]
pub fn extract_group_label<'a>(raw: &'a str, attribute: &str, delimiter: char) -> Option<&'a str> {
    let value = raw.trim_matches('"');
    let value = value
        .strip_prefix(attribute)
        .and_then(|rest| rest.strip_prefix('='))
        .map_or(value, |rest| rest.trim_matches('"'));

    let label = value.split_once(delimiter).map_or(value, |(first, _)| first);
    (!label.is_empty()).then_some(label)
}
