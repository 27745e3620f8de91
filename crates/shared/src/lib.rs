//! Wire types shared between the board client and the position service.

pub mod protocol;
