//! Currency codes published by the National Bank of Georgia.
//!
//! The table is declared once through `define_currencies!`, which generates a
//! string constant per code together with the lookup helpers. To support a
//! new code add a line to the invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     MXN => ("MXN", "Mexican Peso"),
//! }
//! ```

/// Defines currency code constants together with `all()` and `display_name()`.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CONST_NAME => ("CODE", "Display name"),
/// }
/// ```
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal)
        ),* $(,)?
    ) => {
        $(
            #[doc = $display]
            pub const $name: &str = $code;
        )*

        /// Returns every supported currency code, local currency included.
        pub fn all() -> &'static [&'static str] {
            &[$($code),*]
        }

        /// Returns the English display name of a code, ignoring case.
        pub fn display_name(code: &str) -> Option<&'static str> {
            match code.trim().to_ascii_uppercase().as_str() {
                $($code => Some($display),)*
                _ => None,
            }
        }
    };
}

define_currencies! {
    USD => ("USD", "US Dollar"),
    EUR => ("EUR", "Euro"),
    GBP => ("GBP", "Pound Sterling"),
    AED => ("AED", "UAE Dirham"),
    AMD => ("AMD", "Armenian Dram"),
    AUD => ("AUD", "Australian Dollar"),
    AZN => ("AZN", "Azerbaijan Manat"),
    BGN => ("BGN", "Bulgarian Lev"),
    BRL => ("BRL", "Brazilian Real"),
    BYN => ("BYN", "Belarusian Ruble"),
    CAD => ("CAD", "Canadian Dollar"),
    CHF => ("CHF", "Swiss Franc"),
    CNY => ("CNY", "Chinese Yuan"),
    CZK => ("CZK", "Czech Koruna"),
    DKK => ("DKK", "Danish Krone"),
    EGP => ("EGP", "Egyptian Pound"),
    HKD => ("HKD", "Hong Kong Dollar"),
    HUF => ("HUF", "Hungarian Forint"),
    ILS => ("ILS", "Israeli Shekel"),
    INR => ("INR", "Indian Rupee"),
    IRR => ("IRR", "Iranian Rial"),
    ISK => ("ISK", "Icelandic Krona"),
    JPY => ("JPY", "Japanese Yen"),
    KGS => ("KGS", "Kyrgyzstani Som"),
    KRW => ("KRW", "South Korean Won"),
    KWD => ("KWD", "Kuwaiti Dinar"),
    KZT => ("KZT", "Kazakhstani Tenge"),
    MDL => ("MDL", "Moldovan Leu"),
    NOK => ("NOK", "Norwegian Krone"),
    NZD => ("NZD", "New Zealand Dollar"),
    PLN => ("PLN", "Polish Zloty"),
    QAR => ("QAR", "Qatari Riyal"),
    RON => ("RON", "Romanian Leu"),
    RSD => ("RSD", "Serbian Dinar"),
    RUB => ("RUB", "Russian Ruble"),
    SEK => ("SEK", "Swedish Krona"),
    SGD => ("SGD", "Singapore Dollar"),
    TJS => ("TJS", "Tajikistani Somoni"),
    TMT => ("TMT", "Turkmenistan Manat"),
    TRY => ("TRY", "Turkish Lira"),
    UAH => ("UAH", "Ukrainian Hryvnia"),
    UZS => ("UZS", "Uzbekistani Som"),
    ZAR => ("ZAR", "South African Rand"),
    GEL => ("GEL", "Georgian Lari"),
}

/// Home currency of the tax jurisdiction. The feed never publishes it.
pub const LOCAL_CURRENCY: &str = GEL;

/// Returns true when `code` is one of the published codes, ignoring case.
pub fn is_supported(code: &str) -> bool {
    display_name(code).is_some()
}

/// Returns true when `code` names the local currency, ignoring case.
pub fn is_local(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(LOCAL_CURRENCY)
}
