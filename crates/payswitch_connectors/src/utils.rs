use common_enums::enums;
use common_utils::types::{AmountConvertor, MinorUnit};
use error_stack::ResultExt;
use masking::Secret;
use payswitch_domain_models::{
    address::Address,
    router_request_types::{PaymentsCaptureData, PaymentsVoidData, RefundsData},
};
use payswitch_interfaces::errors;

pub(crate) type Error = error_stack::Report<errors::ConnectorError>;

pub(crate) fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> Error + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

pub(crate) fn convert_amount<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: MinorUnit,
    currency: enums::Currency,
) -> Result<T, Error> {
    amount_convertor
        .convert(amount, currency)
        .change_context(errors::ConnectorError::AmountConversionFailed)
}

/// Processor transaction id carried by the follow-up flows.
pub(crate) trait ConnectorTransactionIdData {
    fn connector_transaction_id(&self) -> &str;
}

impl ConnectorTransactionIdData for PaymentsCaptureData {
    fn connector_transaction_id(&self) -> &str {
        &self.connector_transaction_id
    }
}

impl ConnectorTransactionIdData for PaymentsVoidData {
    fn connector_transaction_id(&self) -> &str {
        &self.connector_transaction_id
    }
}

impl ConnectorTransactionIdData for RefundsData {
    fn connector_transaction_id(&self) -> &str {
        &self.connector_transaction_id
    }
}

/// Accessors for address fields processors mandate.
pub(crate) trait AddressData {
    fn get_line1(&self) -> Result<Secret<String>, Error>;
    fn get_city(&self) -> Result<String, Error>;
    fn get_zip(&self) -> Result<Secret<String>, Error>;
    fn get_country(&self) -> Result<enums::CountryAlpha2, Error>;
    fn get_first_name(&self) -> Result<Secret<String>, Error>;
    fn get_last_name(&self) -> Result<Secret<String>, Error>;
}

impl AddressData for Address {
    fn get_line1(&self) -> Result<Secret<String>, Error> {
        self.line1.clone().ok_or_else(missing_field_err("billing.line1"))
    }

    fn get_city(&self) -> Result<String, Error> {
        self.city.clone().ok_or_else(missing_field_err("billing.city"))
    }

    fn get_zip(&self) -> Result<Secret<String>, Error> {
        self.zip.clone().ok_or_else(missing_field_err("billing.zip"))
    }

    fn get_country(&self) -> Result<enums::CountryAlpha2, Error> {
        self.country.ok_or_else(missing_field_err("billing.country"))
    }

    fn get_first_name(&self) -> Result<Secret<String>, Error> {
        self.first_name
            .clone()
            .ok_or_else(missing_field_err("billing.first_name"))
    }

    fn get_last_name(&self) -> Result<Secret<String>, Error> {
        self.last_name
            .clone()
            .ok_or_else(missing_field_err("billing.last_name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_address_fields_name_the_field() {
        let error = Address::default().get_line1().unwrap_err();
        assert_eq!(
            error.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "billing.line1"
            }
        );
    }
}
