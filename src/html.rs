//! Shared page layouts, style classes and small HTML helpers.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "px-4 py-2 text-white bg-red-600 \
    hover:bg-red-500 dark:bg-red-500 dark:hover:bg-red-400 rounded";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_ERROR_STYLE: &str = "text-red-500 text-base";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expenses Tracker" }
                link href={ (endpoints::STATIC) "/main.css" } rel="stylesheet";
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// A full page explaining an error, with a single link for the user to follow.
pub fn error_view_with_action(
    title: &str,
    header: &str,
    description: &str,
    fix: &str,
    action: (&str, &str),
) -> Markup {
    let (action_url, action_text) = action;

    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href=(action_url)
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        (action_text)
                    }
                }
            }
        }
    );

    base(title, &content)
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    error_view_with_action(
        title,
        header,
        description,
        fix,
        (endpoints::EXPENSES_VIEW, "Back to Expenses"),
    )
}

pub fn log_in_register(form_title: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a
                href=(endpoints::EXPENSES_VIEW)
                class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                "Expenses Tracker"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    (form)
                }
            }
        }
    }
}

pub fn username_input(username: &str, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="username"
                class=(FORM_LABEL_STYLE)
            {
                "Username"
            }

            input
                type="text"
                name="username"
                id="username"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                autofocus
                value=(username);

            @if let Some(error_message) = error_message
            {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

pub fn password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="password"
                class=(FORM_LABEL_STYLE)
            {
                "Password"
            }

            input
                type="password"
                name="password"
                id="password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length);

            @if let Some(error_message) = error_message
            {
                p class=(FORM_ERROR_STYLE) { (error_message) }
            }
        }
    }
}

/// numfmt prints amounts with more than 12 integer digits in scientific notation.
const MAX_NUMFMT_AMOUNT: f64 = 1e12;

/// Format `amount` with a thousands separator and two decimal places, e.g. "1,234.50".
pub fn format_amount(amount: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    // With two decimals numfmt also uses scientific notation below one cent.
    if amount.abs() < 0.01 || amount.abs() >= MAX_NUMFMT_AMOUNT {
        return format_amount_plain(amount);
    }

    let formatter = FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap_or_else(|_| Formatter::new())
            .precision(Precision::Decimals(2))
    });

    let formatted = if amount < 0.0 {
        format!("-{}", formatter.fmt_string(amount.abs()))
    } else {
        formatter.fmt_string(amount)
    };

    pad_decimals(formatted)
}

// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_decimals(formatted: String) -> String {
    match formatted.rsplit_once('.') {
        Some((_, decimals)) if decimals.len() == 1 => format!("{formatted}0"),
        Some(_) => formatted,
        None => format!("{formatted}.00"),
    }
}

fn format_amount_plain(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, decimals) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };

    format!("{sign}{grouped}.{decimals}")
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}

#[cfg(test)]
mod format_amount_tests {
    use super::format_amount;

    #[test]
    fn formats_whole_number() {
        assert_eq!(format_amount(40.0), "40.00");
    }

    #[test]
    fn formats_single_decimal() {
        assert_eq!(format_amount(12.3), "12.30");
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_amount(1234.5), "1,234.50");
    }

    #[test]
    fn formats_negative() {
        assert_eq!(format_amount(-10.0), "-10.00");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn formats_sub_cent_amounts_without_exponent() {
        assert_eq!(format_amount(0.001), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(0.009), "0.01");
    }

    #[test]
    fn formats_large_amounts_without_exponent() {
        assert_eq!(format_amount(1e12), "1,000,000,000,000.00");
        assert_eq!(format_amount(-1e20), "-100,000,000,000,000,000,000.00");
        assert_eq!(format_amount(999_999_999_999.0), "999,999,999,999.00");
    }

    #[test]
    fn formats_huge_amount_with_every_digit() {
        let formatted = format_amount(1e300);

        assert!(formatted.starts_with("1,000,000,"), "got {formatted}");
        assert!(formatted.ends_with(".00"), "got {formatted}");
        assert!(!formatted.contains('e'), "got {formatted}");
    }
}
