use regex::Regex;
use std::sync::LazyLock;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex colour pattern is valid")
});

static RGB_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(?:,\s*(?:0|1|0?\.\d+)\s*)?\)$")
        .expect("rgb colour pattern is valid")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*://)?[^\s/$.?#][^\s]*$").expect("url pattern is valid")
});

/// Returns the first error among `validators`.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), String> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Checks a colour literal, returning the user-facing message on failure.
pub fn check_color(value: &str) -> Result<(), String> {
    let value = value.trim();
    if HEX_COLOR.is_match(value) || RGB_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(format!("Invalid color '{value}'. Use a hex value such as #FF0000."))
    }
}

/// Empty strings pass: a cleared link is valid.
pub fn url() -> Validator {
    Box::new(|value: &str| {
        if value.is_empty() || URL.is_match(value) {
            Ok(())
        } else {
            Err(format!("'{value}' is not a valid link"))
        }
    })
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn max_length(max: usize) -> Validator {
    Box::new(move |value: &str| {
        if value.chars().count() > max {
            Err(format!("Maximum length is {max}"))
        } else {
            Ok(())
        }
    })
}

pub fn regex(pattern: &str, message: impl Into<String>) -> Result<Validator, regex::Error> {
    let re = Regex::new(pattern)?;
    let message = message.into();
    Ok(Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_accepts_hex_and_rgb() {
        assert!(check_color("#fff").is_ok());
        assert!(check_color("#668B8B").is_ok());
        assert!(check_color("rgb(10, 20, 30)").is_ok());
        assert!(check_color("rgba(10,20,30,0.5)").is_ok());
        assert!(check_color("#ggg").is_err());
        assert!(check_color("blue-ish").is_err());
    }

    #[test]
    fn url_allows_empty_but_rejects_spaces() {
        let validator = url();
        assert!(validator("").is_ok());
        assert!(validator("https://example.org/a?b=c").is_ok());
        assert!(validator("example.org").is_ok());
        assert!(validator("not a link").is_err());
    }

    #[test]
    fn run_validators_stops_at_first_error() {
        let validators = vec![required("needed"), max_length(3)];
        assert_eq!(run_validators(&validators, " "), Err("needed".to_string()));
        assert_eq!(
            run_validators(&validators, "abcd"),
            Err("Maximum length is 3".to_string())
        );
        assert!(run_validators(&validators, "abc").is_ok());
    }

    #[test]
    fn regex_validator_reports_bad_pattern() {
        assert!(regex("(", "x").is_err());
        let digits = regex(r"^\d+$", "digits only").expect("pattern");
        assert_eq!(digits("12a"), Err("digits only".to_string()));
    }
}
