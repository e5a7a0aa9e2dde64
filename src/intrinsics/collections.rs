//! `Fn::FindInMap`, `Fn::Select`, `Fn::Length` and `Fn::Cidr`.

use std::net::Ipv4Addr;

use serde_json::Value;

use super::{array_args, fixed_args, invalid, kind_of, resolve_integer, resolve_string};
use crate::context::ResolvingContext;
use crate::error::ResolveError;
use crate::traits::{Intrinsic, Resolve};
use crate::types::{IntrinsicName, Template};

const DEFAULT_VALUE_KEY: &str = "DefaultValue";

/// Most subnets one `Fn::Cidr` call may produce.
const MAX_CIDR_COUNT: i64 = 256;

/// `[map, topKey, secondKey]` with an optional trailing `{"DefaultValue": v}`
/// used when any key is missing.
pub struct FindInMap;

impl Intrinsic for FindInMap {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::FindInMap;
        let (keys, default) = match array_args(name, args)? {
            [map, top, second] => ([map, top, second], None),
            [map, top, second, options] => ([map, top, second], Some(options)),
            other => {
                return Err(invalid(
                    name,
                    format!("expects 3 or 4 elements, got {}", other.len()),
                ));
            }
        };
        let default = default
            .map(|options| {
                options
                    .get(DEFAULT_VALUE_KEY)
                    .ok_or_else(|| invalid(name, "fourth element must be {\"DefaultValue\": ...}"))
            })
            .transpose()?;

        let [map, top, second] = keys;
        let map = resolve_string(name, map, "map name", ctx, resolver)?;
        let top = resolve_string(name, top, "top-level key", ctx, resolver)?;
        let second = resolve_string(name, second, "second-level key", ctx, resolver)?;

        match (find_in_map(ctx.template(), &map, &top, &second), default) {
            (Ok(found), _) => resolver.resolve(found, ctx),
            (Err(_), Some(default)) => resolver.resolve(default, ctx),
            (Err(err), None) => Err(err),
        }
    }
}

fn find_in_map<'t>(
    template: &'t Template,
    map: &str,
    top: &str,
    second: &str,
) -> Result<&'t Value, ResolveError> {
    let mapping = template.mappings.get(map).ok_or_else(|| {
        ResolveError::LookupError(format!("Fn::FindInMap: mapping '{map}' not found"))
    })?;
    let level = mapping.get(top).ok_or_else(|| {
        ResolveError::LookupError(format!(
            "Fn::FindInMap: key '{top}' not found in mapping '{map}'"
        ))
    })?;
    level.get(second).ok_or_else(|| {
        ResolveError::LookupError(format!(
            "Fn::FindInMap: key '{second}' not found in mapping '{map}' under '{top}'"
        ))
    })
}

pub struct Select;

impl Intrinsic for Select {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::Select;
        let [index, list] = fixed_args::<2>(name, args)?;
        let index = resolve_integer(name, index, "index", ctx, resolver)?;
        let mut items = match resolver.resolve(list, ctx)? {
            Value::Array(items) => items,
            other => {
                return Err(invalid(
                    name,
                    format!("list must resolve to an array, got {}", kind_of(&other)),
                ));
            }
        };
        let len = items.len();
        usize::try_from(index)
            .ok()
            .filter(|position| *position < len)
            .map(|position| items.swap_remove(position))
            .ok_or_else(|| {
                invalid(
                    name,
                    format!("index {index} is out of bounds for a list of {len} elements"),
                )
            })
    }
}

pub struct Length;

impl Intrinsic for Length {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        match resolver.resolve(args, ctx)? {
            Value::Array(items) => Ok(Value::from(items.len())),
            other => Err(invalid(
                IntrinsicName::Length,
                format!("expects an array, got {}", kind_of(&other)),
            )),
        }
    }
}

/// `[ipBlock, count, cidrBits]`: the first `count` IPv4 subnets of
/// `32 - cidrBits` prefix length inside `ipBlock`.
pub struct Cidr;

impl Intrinsic for Cidr {
    fn resolve(
        &self,
        args: &Value,
        ctx: &mut ResolvingContext<'_>,
        resolver: &dyn Resolve,
    ) -> Result<Value, ResolveError> {
        let name = IntrinsicName::Cidr;
        let [block, count, bits] = fixed_args::<3>(name, args)?;
        let block = resolve_string(name, block, "ip block", ctx, resolver)?;
        let count = resolve_integer(name, count, "count", ctx, resolver)?;
        let bits = resolve_integer(name, bits, "cidrBits", ctx, resolver)?;
        subnets(&block, count, bits)
            .map(|subnets| Value::Array(subnets.into_iter().map(Value::String).collect()))
    }
}

fn subnets(block: &str, count: i64, bits: i64) -> Result<Vec<String>, ResolveError> {
    let name = IntrinsicName::Cidr;
    let (address, prefix) = block
        .split_once('/')
        .ok_or_else(|| malformed(block))?;
    let address: Ipv4Addr = address.parse().map_err(|_| malformed(block))?;
    let prefix: u32 = prefix
        .parse()
        .ok()
        .filter(|prefix| *prefix <= 32)
        .ok_or_else(|| malformed(block))?;

    let subnet_prefix = Some(bits)
        .filter(|bits| (0..=32).contains(bits))
        .and_then(|bits| u32::try_from(32 - bits).ok())
        .filter(|subnet_prefix| (prefix..=32).contains(subnet_prefix))
        .ok_or_else(|| {
            invalid(
                name,
                format!("cidrBits {bits} does not fit inside '{block}'"),
            )
        })?;
    let available = 1u64 << (subnet_prefix - prefix);
    if !(1..=MAX_CIDR_COUNT).contains(&count) || count as u64 > available {
        return Err(invalid(
            name,
            format!("cannot carve {count} subnets of /{subnet_prefix} out of '{block}'"),
        ));
    }

    let mask = if prefix == 0 { 0 } else { u32::MAX << (32 - prefix) };
    let base = u64::from(u32::from(address) & mask);
    Ok((0..count as u64)
        .map(|index| {
            let start = (base + (index << bits)) as u32;
            format!("{}/{subnet_prefix}", Ipv4Addr::from(start))
        })
        .collect())
}

fn malformed(block: &str) -> ResolveError {
    ResolveError::InvalidFormat(format!("Fn::Cidr: '{block}' is not an IPv4 CIDR block"))
}
