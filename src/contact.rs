/// Store contact details and the WhatsApp chat link
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
    /// International number; spaces, `+` and dashes are tolerated
    pub whatsapp_number: String,
    pub whatsapp_message: String,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            whatsapp_number: String::new(),
            whatsapp_message: "Hello! I'm interested in your jewelry collection.".to_string(),
        }
    }
}

impl Contact {
    /// `https://wa.me/<digits>?text=<message>`, or `None` without a number
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return None;
        }

        let message = self.whatsapp_message.trim();
        if message.is_empty() {
            Some(format!("https://wa.me/{}", digits))
        } else {
            Some(format!(
                "https://wa.me/{}?text={}",
                digits,
                urlencoding::encode(message)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_url_encodes_message() {
        let contact = Contact {
            whatsapp_number: "+94 76-939 2773".into(),
            ..Contact::default()
        };
        assert_eq!(
            contact.whatsapp_url().as_deref(),
            Some("https://wa.me/94769392773?text=Hello%21%20I%27m%20interested%20in%20your%20jewelry%20collection.")
        );
    }

    #[test]
    fn test_whatsapp_url_without_message() {
        let contact = Contact {
            whatsapp_number: "94769392773".into(),
            whatsapp_message: "   ".into(),
            ..Contact::default()
        };
        assert_eq!(contact.whatsapp_url().as_deref(), Some("https://wa.me/94769392773"));
    }

    #[test]
    fn test_whatsapp_url_needs_number() {
        assert_eq!(Contact::default().whatsapp_url(), None);
    }
}
