const FALLBACK_SALUTATION: &str = "Уважаемый получатель!";

/// Derives the greeting line from the recipient's full name.
///
/// The name is split on whitespace (empty tokens discarded). With two or
/// more tokens the first two form the address, extras are ignored; with
/// fewer the fixed fallback is used. Total over any input, including empty
/// and all-whitespace strings.
pub fn salutation(recipient_name: &str) -> String {
    let mut tokens = recipient_name.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(second)) => format!("Уважаемый {first} {second}!"),
        _ => FALLBACK_SALUTATION.to_string(),
    }
}
