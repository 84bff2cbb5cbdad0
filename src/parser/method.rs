//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

use crate::parser::error::Error;

/// HTTP request methods a route can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method: Requests a representation of the specified resource.
    GET,
    /// POST method: Submits data to be processed to the identified resource.
    POST,
    /// PUT method: Replaces all current representations of the target resource with the request payload.
    PUT,
    /// DELETE method: Deletes the specified resource.
    DELETE,
    /// HEAD method: Same as GET but only transfers the status line and header section.
    HEAD,
    /// OPTIONS method: Describes the communication options for the target resource.
    OPTIONS,
    /// PATCH method: Applies partial modifications to a resource.
    PATCH,
}

impl Method {
    /// Every supported method, in the order they are listed in `Allow` headers.
    pub const ALL: [Method; 7] = [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    /// The uppercase token used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| Error::InvalidMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
