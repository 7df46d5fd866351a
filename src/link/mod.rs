//! Serial command link to the host.
//!
//! | Module      | Role                                             |
//! |-------------|--------------------------------------------------|
//! | `codec`     | Newline framing (`LineDecoder`, `encode_line`)   |
//! | `protocol`  | JSON encoding of commands and responses          |
//! | `channels`  | Reader thread → control loop channel             |
//! | `reader`    | Blocking UART reader feeding the channel         |

pub mod channels;
pub mod codec;
pub mod protocol;
pub mod reader;
