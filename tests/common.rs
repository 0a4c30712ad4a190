#![allow(dead_code)]

use async_trait::async_trait;
use cloudpayments::{ClientConfig, CloudPaymentsClient, Credentials, InteractionError, Transport};
use http::HeaderMap;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub const PUBLIC_ID: &str = "test_api_00000000000000000000002";
pub const API_SECRET: &str = "9272c64f-d49f-4bbc-83e8-1753496b4e3b";
pub const AUTHORIZATION: &str =
    "Basic dGVzdF9hcGlfMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDI6OTI3MmM2NGYtZDQ5Zi00YmJjLTgzZTgtMTc1MzQ5NmI0ZTNi";

/// Shortened Yandex Pay cryptogram from the CloudPayments API docs
pub const CARD_CRYPTOGRAM_PACKET: &str = r#"{"type":"Yandex","signedMessage":"{\"encryptedMessage\":\"xqpAiS2L71BZNgH514AQDwOVawJF4gHXF8P+ECIFRqFHlDMRtxHsO9hNQSeegSssRdDMlBIyOObY5dqI3iwX99UKYP6qFD+tKEY\",\"tag\":\"LTx6/HA9iWaZwbYaFN1j9aDOPp2PBlR2iBMUBQ7zyUg=\"}","protocolVersion":"ECv2","signature":"MEUCICyyzWnCEf2iHlUszDzvbAx/qk/sLmbTaOWPVEq1hr29AiEA0lfZ85pCofYhxVX971Xtshysawi7+KEe8ZpPVlV/Md4="}"#;

pub fn client_for(server_url: &str) -> CloudPaymentsClient {
    let config = ClientConfig::new(server_url).with_timeout(Duration::from_secs(5));
    CloudPaymentsClient::with_config(Credentials::new(PUBLIC_ID, API_SECRET), config).unwrap()
}

pub fn response_success() -> Value {
    json!({
        "Model": {
            "ReasonCode": 0,
            "PublicId": "pk_********************************",
            "TerminalUrl": "http://test.test",
            "TransactionId": 891510444,
            "Amount": 10,
            "Currency": "RUB",
            "CurrencyCode": 0,
            "PaymentAmount": 10,
            "PaymentCurrency": "RUB",
            "InvoiceId": "1234567",
            "AccountId": "user_x",
            "Email": null,
            "Description": "Оплата товаров в example.com",
            "JsonData": null,
            "CreatedDate": "/Date(1635150224630)/",
            "CreatedDateIso": "2021-10-25T08:23:44",
            "AuthDate": "/Date(1635150224739)/",
            "AuthDateIso": "2021-10-25T08:23:44",
            "AuthCode": "A1B2C3",
            "TestMode": true,
            "IpAddress": "123.123.123.123",
            "IpCountry": "CN",
            "CardFirstSix": "411111",
            "CardLastFour": "1111",
            "CardExpDate": "11/25",
            "CardType": "Visa",
            "Issuer": "CloudPayments",
            "Status": "Authorized",
            "StatusCode": 2,
            "CultureName": "ru",
            "Reason": "Approved",
            "CardHolderMessage": "Оплата успешно проведена",
            "Type": 0,
            "Refunded": false,
            "Name": "CARDHOLDER NAME",
            "Token": "0a0afb77-8f41-4de2-9524-1057f9695303",
            "SubscriptionId": null,
            "GatewayName": "Test",
            "TotalFee": 0
        },
        "Success": true,
        "Message": null
    })
}

pub fn response_declined() -> Value {
    json!({
        "Model": {
            "ReasonCode": 5051,
            "PublicId": "pk_**********************************",
            "TransactionId": 891583633,
            "Amount": 10,
            "Currency": "RUB",
            "InvoiceId": "1234567",
            "AccountId": "user_x",
            "Description": "Оплата товаров в example.com",
            "TestMode": true,
            "CardFirstSix": "400005",
            "CardLastFour": "5556",
            "CardType": "Visa",
            "Status": "Declined",
            "StatusCode": 5,
            "Reason": "InsufficientFunds",
            "CardHolderMessage": "Недостаточно средств на карте",
            "Token": "tk_255c42192323f2e09ea17635302c3",
            "TotalFee": 0
        },
        "Success": false,
        "Message": null
    })
}

pub fn response_rejected() -> Value {
    json!({
        "Success": false,
        "Message": "Amount is required"
    })
}

/// A request as seen by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Transport that records requests and answers with a fixed body after a delay
pub struct RecordingTransport {
    pub response: Value,
    pub delay: Duration,
    pub requests: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    pub fn new(response: Value, delay: Duration) -> Self {
        Self {
            response,
            delay,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post_json(
        &self,
        _service: &'static str,
        interaction_method: &str,
        url: Url,
        headers: HeaderMap,
        body: Value,
    ) -> Result<Value, InteractionError> {
        // Hold the request across a suspension point so concurrent calls interleave
        tokio::time::sleep(self.delay).await;

        self.requests.lock().unwrap().push(Recorded {
            method: interaction_method.to_string(),
            url,
            headers,
            body,
        });

        Ok(self.response.clone())
    }
}
