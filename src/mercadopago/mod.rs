pub mod client;

pub use client::{
    PreferenceClient, PreferenceItem, PreferenceRequest, PreferenceResponse, ProviderError,
    CURRENCY_ID,
};
