//! Action dispatch: maps interpreter action codes to portal effects.
//!
//! The vocabulary is closed. Strings outside it parse to `None` and the
//! caller ignores them; they are valid input, not errors.

use crate::interpreter::{ParamValue, Parameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCode {
    RenewLicense,
    CheckStatus,
    GoHome,
    Help,
    Logout,
    CheckVehicle,
    PayTax,
    BookTest,
    DownloadRc,
    CheckChallan,
    ApplyNoc,
    UpdateAddress,
    GetPermit,
}

impl ActionCode {
    /// Parse a wire action string. Unknown codes yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let code = match s {
            "RENEW_LICENSE" => Self::RenewLicense,
            "CHECK_STATUS" => Self::CheckStatus,
            "GO_HOME" => Self::GoHome,
            "HELP" => Self::Help,
            "LOGOUT" => Self::Logout,
            "CHECK_VEHICLE" => Self::CheckVehicle,
            "PAY_TAX" => Self::PayTax,
            "BOOK_TEST" => Self::BookTest,
            "DOWNLOAD_RC" => Self::DownloadRc,
            "CHECK_CHALLAN" => Self::CheckChallan,
            "APPLY_NOC" => Self::ApplyNoc,
            "UPDATE_ADDRESS" => Self::UpdateAddress,
            "GET_PERMIT" => Self::GetPermit,
            _ => return None,
        };
        Some(code)
    }
}

/// A single client-side effect produced by dispatching an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Full-page navigation to a portal page (relative URL).
    Navigate(&'static str),
    /// Informational alert shown to the user.
    Alert(String),
    /// Ask the user to supply a missing value.
    Prompt(String),
}

pub const HELP_TEXT: &str = "Help: You can say things like renew license, check status, \
    go home, logout, check vehicle details, pay tax, book test, download RC, \
    check challan, apply NOC, update address, get permit.";

/// Total dispatch table: every known code maps to exactly one effect.
pub fn dispatch(code: ActionCode, parameters: &Parameters) -> Effect {
    match code {
        ActionCode::RenewLicense => Effect::Navigate("renewLicense.xhtml"),
        ActionCode::CheckStatus => Effect::Navigate("status.xhtml"),
        ActionCode::GoHome => Effect::Navigate("index.html"),
        ActionCode::Help => Effect::Alert(HELP_TEXT.to_string()),
        ActionCode::Logout => Effect::Navigate("logout.xhtml"),
        ActionCode::CheckVehicle => {
            // The lookup itself lives on the portal side; here we only show
            // which vehicle was understood, or ask for one.
            match parameters.get("vehicleNumber").and_then(ParamValue::as_text) {
                Some(number) => Effect::Alert(format!("Vehicle details for: {number}")),
                None => Effect::Prompt("Please specify a vehicle number.".to_string()),
            }
        }
        ActionCode::PayTax => Effect::Navigate("payTax.xhtml"),
        ActionCode::BookTest => Effect::Navigate("bookTest.xhtml"),
        ActionCode::DownloadRc => Effect::Navigate("downloadRC.xhtml"),
        ActionCode::CheckChallan => Effect::Navigate("challanStatus.xhtml"),
        ActionCode::ApplyNoc => Effect::Navigate("applyNOC.xhtml"),
        ActionCode::UpdateAddress => Effect::Navigate("updateAddress.xhtml"),
        ActionCode::GetPermit => Effect::Navigate("permitInfo.xhtml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Parameters;

    fn no_params() -> Parameters {
        Parameters::new()
    }

    #[test]
    fn every_known_code_maps_to_its_fixed_effect() {
        let navigation = [
            ("RENEW_LICENSE", "renewLicense.xhtml"),
            ("CHECK_STATUS", "status.xhtml"),
            ("GO_HOME", "index.html"),
            ("LOGOUT", "logout.xhtml"),
            ("PAY_TAX", "payTax.xhtml"),
            ("BOOK_TEST", "bookTest.xhtml"),
            ("DOWNLOAD_RC", "downloadRC.xhtml"),
            ("CHECK_CHALLAN", "challanStatus.xhtml"),
            ("APPLY_NOC", "applyNOC.xhtml"),
            ("UPDATE_ADDRESS", "updateAddress.xhtml"),
            ("GET_PERMIT", "permitInfo.xhtml"),
        ];

        for (wire, page) in navigation {
            let code = ActionCode::parse(wire).unwrap();
            assert_eq!(dispatch(code, &no_params()), Effect::Navigate(page), "{wire}");
        }

        assert_eq!(
            dispatch(ActionCode::Help, &no_params()),
            Effect::Alert(HELP_TEXT.to_string())
        );
        // CHECK_VEHICLE without a number still produces exactly one effect.
        assert!(matches!(
            dispatch(ActionCode::CheckVehicle, &no_params()),
            Effect::Prompt(_)
        ));
    }

    #[test]
    fn unknown_codes_parse_to_none() {
        assert!(ActionCode::parse("UNKNOWN_CODE").is_none());
        assert!(ActionCode::parse("").is_none());
        // Wire codes are case-sensitive.
        assert!(ActionCode::parse("go_home").is_none());
    }

    #[test]
    fn check_vehicle_with_number_alerts_the_exact_value() {
        let mut params = Parameters::new();
        params.insert(
            "vehicleNumber".to_string(),
            ParamValue::Text("MH12AB1234".to_string()),
        );

        assert_eq!(
            dispatch(ActionCode::CheckVehicle, &params),
            Effect::Alert("Vehicle details for: MH12AB1234".to_string())
        );
    }

    #[test]
    fn check_vehicle_without_number_prompts() {
        assert_eq!(
            dispatch(ActionCode::CheckVehicle, &no_params()),
            Effect::Prompt("Please specify a vehicle number.".to_string())
        );
    }

    #[test]
    fn check_vehicle_ignores_non_text_number() {
        let mut params = Parameters::new();
        params.insert("vehicleNumber".to_string(), ParamValue::Number(1234.0));

        assert!(matches!(
            dispatch(ActionCode::CheckVehicle, &params),
            Effect::Prompt(_)
        ));
    }

    #[test]
    fn help_lists_the_spoken_commands() {
        for phrase in ["renew license", "check status", "go home", "get permit"] {
            assert!(HELP_TEXT.contains(phrase), "missing {phrase}");
        }
    }
}
