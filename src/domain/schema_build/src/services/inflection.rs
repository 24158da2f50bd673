/// `created_at` -> `createdAt`
pub fn camel_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if ch == '_' {
            // Leading underscores are kept, as GraphQL names may start with one
            if result.is_empty() {
                result.push(ch);
            } else {
                upper_next = true;
            }
            continue;
        }

        if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

/// `posting_created` -> `PostingCreated`
pub fn upper_camel_case(name: &str) -> String {
    let camel = camel_case(name.trim_start_matches('_'));
    let mut chars = camel.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
