use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

fn env_ref_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"))
}

/// Expand `${VAR_NAME}` references using `lookup`. Unresolved references
/// are left as written.
pub fn expand_env_var_in_string<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    env_ref_pattern()
        .replace_all(value, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand environment references in every value of a map
pub fn expand_env_vars<F>(env: &HashMap<String, String>, lookup: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded: Vec<(String, String)> = env
        .iter()
        .map(|(key, value)| (key.clone(), expand_env_var_in_string(value, &lookup)))
        .collect();
    expanded.sort_by(|a, b| a.0.cmp(&b.0));
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/dev".to_string()),
            "SPACE" => Some("example.backlog.com".to_string()),
            _ => None,
        }
    }

    #[test]
    fn expands_known_references() {
        assert_eq!(
            expand_env_var_in_string("${HOME}/.cache/${SPACE}", lookup),
            "/home/dev/.cache/example.backlog.com"
        );
    }

    #[test]
    fn leaves_unknown_references_verbatim() {
        assert_eq!(
            expand_env_var_in_string("token=${MISSING}", lookup),
            "token=${MISSING}"
        );
    }

    #[test]
    fn expands_map_values_sorted_by_key() {
        let mut env = HashMap::new();
        env.insert("B".to_string(), "${SPACE}".to_string());
        env.insert("A".to_string(), "plain".to_string());

        let expanded = expand_env_vars(&env, lookup);
        assert_eq!(
            expanded,
            vec![
                ("A".to_string(), "plain".to_string()),
                ("B".to_string(), "example.backlog.com".to_string()),
            ]
        );
    }
}
