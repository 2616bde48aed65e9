//! Channel selection by subscriber count and deletion marker

use crate::error::{Error, ErrorKind, Result};
use crate::xml::Parser;

/// Ids of channels with two or more subscribers and a `DELETE` comment
///
/// A channel qualifies when it has at least two `subscriber` element
/// children and at least one direct comment child whose text is exactly
/// `DELETE`. Ids are validated up front so the returned sequence yields
/// plain integers, in document order.
pub fn channel_ids(xml: &str) -> Result<ChannelIds> {
    let doc = Parser::new(xml.as_bytes()).parse()?;

    let mut ids = Vec::new();
    for channel in doc.root.elements() {
        let subscribers = channel.children_named("subscriber").count();
        if subscribers < 2 {
            continue;
        }
        if !channel.comments().any(|text| text == "DELETE") {
            continue;
        }

        let id = channel.attr("id").ok_or_else(|| {
            Error::unspanned(ErrorKind::MissingAttribute {
                name: "id".to_string(),
            })
        })?;
        let id: i32 = id.parse().map_err(|_| {
            Error::unspanned(ErrorKind::InvalidNumber {
                value: id.to_string(),
            })
        })?;
        ids.push(id);
    }

    Ok(ChannelIds {
        ids: ids.into_iter(),
    })
}

/// Finite, order-preserving sequence of selected channel ids
///
/// Cloning restarts the sequence from the beginning.
#[derive(Clone, Debug)]
pub struct ChannelIds {
    ids: std::vec::IntoIter<i32>,
}

impl Iterator for ChannelIds {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.ids.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for ChannelIds {}
