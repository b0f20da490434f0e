// Service offering models
// The closed set of services the chatbot qualifies leads for

use serde::{Deserialize, Serialize};

/// Services offered by the agency, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceOffering {
    #[serde(rename = "Digital Ecosystem Strategy")]
    DigitalEcosystemStrategy,
    #[serde(rename = "Web App Development")]
    WebAppDevelopment,
    #[serde(rename = "Mobile App Development")]
    MobileAppDevelopment,
    #[serde(rename = "Blockchain & Web3 Solutions")]
    BlockchainWeb3,
    #[serde(rename = "AI Automations & SaaS")]
    AiAutomationsSaas,
    #[serde(rename = "Headless E-Commerce")]
    HeadlessEcommerce,
}

impl ServiceOffering {
    /// All offerings in menu order
    pub const ALL: [ServiceOffering; 6] = [
        ServiceOffering::DigitalEcosystemStrategy,
        ServiceOffering::WebAppDevelopment,
        ServiceOffering::MobileAppDevelopment,
        ServiceOffering::BlockchainWeb3,
        ServiceOffering::AiAutomationsSaas,
        ServiceOffering::HeadlessEcommerce,
    ];

    /// Label shown to visitors and used in lead payloads
    pub fn label(&self) -> &'static str {
        match self {
            ServiceOffering::DigitalEcosystemStrategy => "Digital Ecosystem Strategy",
            ServiceOffering::WebAppDevelopment => "Web App Development",
            ServiceOffering::MobileAppDevelopment => "Mobile App Development",
            ServiceOffering::BlockchainWeb3 => "Blockchain & Web3 Solutions",
            ServiceOffering::AiAutomationsSaas => "AI Automations & SaaS",
            ServiceOffering::HeadlessEcommerce => "Headless E-Commerce",
        }
    }

    /// First offering whose label appears in `text`, in menu order
    pub fn named_in(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| lower.contains(&s.label().to_lowercase()))
    }

    /// Labels in menu order
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.label()).collect()
    }
}

impl std::fmt::Display for ServiceOffering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order() {
        assert_eq!(
            ServiceOffering::labels(),
            vec![
                "Digital Ecosystem Strategy",
                "Web App Development",
                "Mobile App Development",
                "Blockchain & Web3 Solutions",
                "AI Automations & SaaS",
                "Headless E-Commerce",
            ]
        );
    }

    #[test]
    fn test_named_in_is_case_insensitive() {
        assert_eq!(
            ServiceOffering::named_in("i need WEB APP DEVELOPMENT asap"),
            Some(ServiceOffering::WebAppDevelopment)
        );
        assert_eq!(ServiceOffering::named_in("a web app"), None);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&ServiceOffering::BlockchainWeb3).unwrap();
        assert_eq!(json, "\"Blockchain & Web3 Solutions\"");
    }
}
