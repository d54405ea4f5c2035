//! String-backed format types.

use crate::checksum::{is_credit_card, is_isbn, is_isbn10, is_isbn13, is_ssn};
use crate::define_string_format;
use crate::email::is_email;
use crate::hostname::is_hostname;
use crate::network::{is_cidr, is_ipv4, is_ipv6, is_mac};
use crate::pattern::{is_hex_color, is_password, is_rgb_color};
use crate::uri::is_uri;

define_string_format!(
    /// An absolute URI.
    Uri, "uri", is_uri
);

define_string_format!(
    /// A mailbox address (`addr-spec`).
    Email, "email", is_email
);

define_string_format!(
    /// A hostname, IDN label sequence or IP literal.
    Hostname, "hostname", is_hostname
);

define_string_format!(
    /// A dotted-quad IPv4 address.
    Ipv4, "ipv4", is_ipv4
);

define_string_format!(
    /// An IPv6 address.
    Ipv6, "ipv6", is_ipv6
);

define_string_format!(
    /// An IP network in CIDR notation, e.g. `192.0.2.0/24`.
    Cidr, "cidr", is_cidr
);

define_string_format!(
    /// An IEEE 802 MAC address.
    Mac, "mac", is_mac
);

define_string_format!(
    /// An ISBN-10 or ISBN-13.
    Isbn, "isbn", is_isbn
);

define_string_format!(Isbn10, "isbn10", is_isbn10);

define_string_format!(Isbn13, "isbn13", is_isbn13);

define_string_format!(
    /// A payment card number.
    CreditCard, "creditcard", is_credit_card
);

define_string_format!(
    /// A US social security number.
    Ssn, "ssn", is_ssn
);

define_string_format!(
    /// A hex color such as `#ff8800`.
    HexColor, "hexcolor", is_hex_color
);

define_string_format!(
    /// A color in `rgb(r,g,b)` notation.
    RgbColor, "rgbcolor", is_rgb_color
);

define_string_format!(
    /// A password. Any text is accepted; the type only marks the field.
    Password, "password", is_password
);
