//! Lists the export column catalog.

use crate::{
    libs::{columns::columns, messages::Message, view::View},
    msg_print,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    msg_print!(Message::ColumnsHeader);
    View::columns(columns());
    Ok(())
}
