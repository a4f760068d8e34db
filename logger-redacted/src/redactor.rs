use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern");
    static ref PHONE_REGEX: Regex =
        Regex::new(r"(?:\+1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b").expect("phone pattern");
    static ref SSN_REGEX: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("ssn pattern");
    static ref CREDIT_CARD_REGEX: Regex =
        Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b").expect("card pattern");
    static ref IP_REGEX: Regex =
        Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").expect("ip pattern");
    static ref MRN_REGEX: Regex = Regex::new(r"\bMRN[-:\s]?\d{4,}\b").expect("mrn pattern");
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_ssn: bool,
    pub redact_credit_cards: bool,
    pub redact_ip_addresses: bool,
    pub redact_medical_record_numbers: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_ssn: true,
            redact_credit_cards: true,
            redact_ip_addresses: true,
            redact_medical_record_numbers: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Card numbers and SSNs first: the phone pattern would otherwise eat
        // their digit groups.
        if self.config.redact_credit_cards {
            result = self.redact_credit_cards(&result);
        }

        if self.config.redact_ssn {
            result = self.redact_ssn(&result);
        }

        if self.config.redact_medical_record_numbers {
            result = self.redact_medical_record_numbers(&result);
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_phones {
            result = self.redact_phones(&result);
        }

        if self.config.redact_ip_addresses {
            result = self.redact_ip_addresses(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let email = &caps[0];
                if self.config.hash_for_correlation {
                    format!("EMAIL[{}]", self.hash_value(email))
                } else {
                    match email.split_once('@') {
                        Some((local, domain)) => format!(
                            "{}***@{}***",
                            local.chars().next().unwrap_or('*'),
                            domain.chars().next().unwrap_or('*')
                        ),
                        None => "***@***".to_string(),
                    }
                }
            })
            .to_string()
    }

    fn redact_phones(&self, text: &str) -> String {
        PHONE_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("PHONE[{}]", self.hash_value(&caps[0]))
                } else {
                    "(***) ***-****".to_string()
                }
            })
            .to_string()
    }

    fn redact_ssn(&self, text: &str) -> String {
        SSN_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("SSN[{}]", self.hash_value(&caps[0]))
                } else {
                    "***-**-****".to_string()
                }
            })
            .to_string()
    }

    fn redact_credit_cards(&self, text: &str) -> String {
        CREDIT_CARD_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("CC[{}]", self.hash_value(&caps[0]))
                } else {
                    "****-****-****-****".to_string()
                }
            })
            .to_string()
    }

    fn redact_ip_addresses(&self, text: &str) -> String {
        IP_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("IP[{}]", self.hash_value(&caps[0]))
                } else {
                    let parts: Vec<&str> = caps[0].split('.').collect();
                    match (parts.first(), parts.last()) {
                        (Some(first), Some(last)) if parts.len() == 4 => {
                            format!("{}.***.***.{}", first, last)
                        }
                        _ => "***.***.***.***".to_string(),
                    }
                }
            })
            .to_string()
    }

    fn redact_medical_record_numbers(&self, text: &str) -> String {
        MRN_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    format!("MRN[{}]", self.hash_value(&caps[0]))
                } else {
                    "MRN[REDACTED]".to_string()
                }
            })
            .to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let digest = Sha256::digest(value.as_bytes());
        // first 8 bytes are enough to correlate within a log stream
        general_purpose::STANDARD_NO_PAD.encode(&digest[..8])
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new(RedactionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let redacted = masking_redactor().redact("Registered john.doe@example.com");
        assert!(redacted.contains("j***@e***"));
        assert!(!redacted.contains("john.doe"));
    }

    #[test]
    fn test_phone_redaction() {
        let redacted = masking_redactor().redact("Emergency contact (555) 123-4567");
        assert!(redacted.contains("(***) ***-****"));
        assert!(!redacted.contains("123-4567"));
    }

    #[test]
    fn test_ssn_and_card_are_not_mistaken_for_phones() {
        let redacted = masking_redactor().redact("ssn 123-45-6789 card 4111-1111-1111-1111");
        assert!(redacted.contains("***-**-****"));
        assert!(redacted.contains("****-****-****-****"));
    }

    #[test]
    fn test_medical_record_number_redaction() {
        let redacted = masking_redactor().redact("admitted MRN004512 to ward 3");
        assert_eq!(redacted, "admitted MRN[REDACTED] to ward 3");
    }

    #[test]
    fn test_ip_redaction_keeps_outer_octets() {
        let redacted = masking_redactor().redact("request from 192.168.1.100");
        assert!(redacted.contains("192.***.***.100"));
    }

    #[test]
    fn test_hash_is_stable_for_correlation() {
        let redactor = PiiRedactor::default();
        let first = redactor.redact("MRN123456 vitals recorded");
        let second = redactor.redact("MRN123456 discharged");
        let tag = |s: &str| s.split_whitespace().next().unwrap().to_string();
        assert_eq!(tag(&first), tag(&second));
        assert!(first.starts_with("MRN["));
        assert!(!first.contains("123456"));
    }

    #[test]
    fn test_custom_pattern() {
        let redactor = PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            custom_patterns: vec![(Regex::new(r"Patient \w+").unwrap(), "Patient [NAME]".to_string())],
            ..Default::default()
        });
        assert_eq!(redactor.redact("Patient Smith admitted"), "Patient [NAME] admitted");
    }
}
