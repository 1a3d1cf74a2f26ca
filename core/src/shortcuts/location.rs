use super::{error::EncodeError, network::NetworkLink, volume::VolumeId};
use crate::utils::{
    nom_helper::{malformed, nom_data, nom_null_terminated_string, nom_unsigned_four_bytes},
    strings::{is_latin1, StringEncoding},
    writer::ByteWriter,
};
use common::windows::LocationFlag;
use nom::{combinator::cut, Parser};

/// `LinkInfo` structure. Resolves the target to a local path, a network share, or both
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LinkInfo {
    /**Present when the VolumeIDAndLocalBasePath flag is set */
    pub local: Option<LocalTarget>,
    /**Present when the CommonNetworkRelativeLinkAndPathSuffix flag is set */
    pub network: Option<NetworkLink>,
    pub common_path_suffix: String,
    pub common_path_suffix_unicode: Option<String>,
    /**Bytes inside the declared size that follow every known string */
    pub tail: Vec<u8>,
}

/// Local part of `LinkInfo`
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LocalTarget {
    pub volume: VolumeId,
    pub local_base_path: String,
    pub local_base_path_unicode: Option<String>,
}

const VOLUME_AND_LOCAL_PATH: u32 = 0x1;
const NETWORK_AND_SUFFIX: u32 = 0x2;
const HEADER_SIZE: u32 = 0x1c;
const UNICODE_HEADER_SIZE: u32 = 0x24;

impl LocalTarget {
    /// Local target on a fixed drive. A UTF16 copy of the path is added if it cannot be stored as a single byte string
    pub fn new(path: &str) -> LocalTarget {
        let fixed_drive = 3;
        LocalTarget {
            volume: VolumeId {
                drive_type: fixed_drive,
                ..Default::default()
            },
            local_base_path: ansi_path(path),
            local_base_path_unicode: if is_latin1(path) {
                None
            } else {
                Some(path.to_string())
            },
        }
    }

    /// Base path to use for the target path. UTF16 path is preferred
    pub(crate) fn base_path(&self) -> &str {
        self.local_base_path_unicode
            .as_deref()
            .unwrap_or(&self.local_base_path)
    }
}

impl LinkInfo {
    /// Parse the Location information from `shortcut` data
    pub(crate) fn parse_location(data: &[u8]) -> nom::IResult<&[u8], LinkInfo> {
        let (_, size) = nom_unsigned_four_bytes(data)?;
        if size < HEADER_SIZE {
            return malformed(data);
        }
        let (remaining_input, location_data) = nom_data(data, size as u64)?;

        // All of the location data is available. Any short read from here on is an inconsistency
        let (_, location) = cut(LinkInfo::parse_location_data).parse(location_data)?;
        Ok((remaining_input, location))
    }

    /// Parse `LinkInfo` bytes. All offsets are relative to the start of the structure
    fn parse_location_data(data: &[u8]) -> nom::IResult<&[u8], LinkInfo> {
        let (input, size) = nom_unsigned_four_bytes(data)?;
        let (input, header_size) = nom_unsigned_four_bytes(input)?;
        if header_size < HEADER_SIZE || header_size > size {
            return malformed(data);
        }

        let (input, flags) = nom_unsigned_four_bytes(input)?;
        let (input, volume_offset) = nom_unsigned_four_bytes(input)?;
        let (input, local_path_offset) = nom_unsigned_four_bytes(input)?;
        let (input, network_offset) = nom_unsigned_four_bytes(input)?;
        let (input, common_path_offset) = nom_unsigned_four_bytes(input)?;

        let mut unicode_local_path_offset = 0;
        let mut unicode_common_path_offset = 0;
        if header_size >= UNICODE_HEADER_SIZE {
            let (input, offset) = nom_unsigned_four_bytes(input)?;
            unicode_local_path_offset = offset;
            let (_, offset) = nom_unsigned_four_bytes(input)?;
            unicode_common_path_offset = offset;
        }

        let mut location = LinkInfo::default();
        // Track the furthest byte used. Anything after it is kept as the tail
        let mut end = header_size as usize;

        if flags & VOLUME_AND_LOCAL_PATH == VOLUME_AND_LOCAL_PATH {
            let (volume_start, _) = offset_data(data, volume_offset)?;
            let (_, (volume, volume_size)) = VolumeId::parse_volume(volume_start)?;
            let (_, volume_end) = structure_end(data, volume_offset, volume_size)?;
            end = end.max(volume_end);

            let (local_base_path, path_end) =
                location_string(data, local_path_offset, &StringEncoding::Ansi)?;
            end = end.max(path_end);

            let mut local_base_path_unicode = None;
            let no_unicode = 0;
            if unicode_local_path_offset != no_unicode {
                let (path, path_end) =
                    location_string(data, unicode_local_path_offset, &StringEncoding::Unicode)?;
                end = end.max(path_end);
                local_base_path_unicode = Some(path);
            }

            location.local = Some(LocalTarget {
                volume,
                local_base_path,
                local_base_path_unicode,
            });
        }

        if flags & NETWORK_AND_SUFFIX == NETWORK_AND_SUFFIX {
            let (network_start, _) = offset_data(data, network_offset)?;
            let (_, (network, network_size)) = NetworkLink::parse_network(network_start)?;
            let (_, network_end) = structure_end(data, network_offset, network_size)?;
            end = end.max(network_end);
            location.network = Some(network);
        }

        let no_path = 0;
        if common_path_offset != no_path {
            let (common_path, path_end) =
                location_string(data, common_path_offset, &StringEncoding::Ansi)?;
            end = end.max(path_end);
            location.common_path_suffix = common_path;
        }
        if unicode_common_path_offset != no_path {
            let (common_path, path_end) =
                location_string(data, unicode_common_path_offset, &StringEncoding::Unicode)?;
            end = end.max(path_end);
            location.common_path_suffix_unicode = Some(common_path);
        }

        if end < data.len() {
            location.tail = data[end..].to_vec();
        }

        Ok((&[], location))
    }

    /**
     * Create `LinkInfo` bytes using the layout Windows creates:
     *   header, VolumeID, LocalBasePath, CommonNetworkRelativeLink, CommonPathSuffix, UTF16 strings, tail
     */
    pub(crate) fn location_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let has_unicode = self
            .local
            .as_ref()
            .is_some_and(|local| local.local_base_path_unicode.is_some())
            || self.common_path_suffix_unicode.is_some();
        let header_size = if has_unicode {
            UNICODE_HEADER_SIZE
        } else {
            HEADER_SIZE
        } as usize;

        let mut body = ByteWriter::new();
        let mut flags = 0;
        let mut volume_offset = 0;
        let mut local_path_offset = 0;
        let mut network_offset = 0;

        if let Some(local) = &self.local {
            flags |= VOLUME_AND_LOCAL_PATH;
            volume_offset = header_size + body.len();
            body.write_data(&local.volume.volume_bytes()?)?;

            local_path_offset = header_size + body.len();
            body.write_null_terminated_string(&local.local_base_path, &StringEncoding::Ansi)?;
        }

        if let Some(network) = &self.network {
            flags |= NETWORK_AND_SUFFIX;
            network_offset = header_size + body.len();
            body.write_data(&network.network_bytes()?)?;
        }

        let common_path_offset = header_size + body.len();
        body.write_null_terminated_string(&self.common_path_suffix, &StringEncoding::Ansi)?;

        let mut unicode_local_path_offset = 0;
        if let Some(path) = self
            .local
            .as_ref()
            .and_then(|local| local.local_base_path_unicode.as_ref())
        {
            unicode_local_path_offset = header_size + body.len();
            body.write_null_terminated_string(path, &StringEncoding::Unicode)?;
        }
        let mut unicode_common_path_offset = 0;
        if let Some(path) = &self.common_path_suffix_unicode {
            unicode_common_path_offset = header_size + body.len();
            body.write_null_terminated_string(path, &StringEncoding::Unicode)?;
        }
        body.write_data(&self.tail)?;

        let mut writer = ByteWriter::new();
        writer.write_size(header_size + body.len())?;
        writer.write_size(header_size)?;
        writer.write_four_bytes(flags)?;
        writer.write_size(volume_offset)?;
        writer.write_size(local_path_offset)?;
        writer.write_size(network_offset)?;
        writer.write_size(common_path_offset)?;
        if has_unicode {
            writer.write_size(unicode_local_path_offset)?;
            writer.write_size(unicode_common_path_offset)?;
        }
        writer.write_data(&body.into_bytes())?;
        Ok(writer.into_bytes())
    }

    /// The target path described by `LinkInfo`. Local path is preferred over the network share
    pub(crate) fn target_path(&self) -> Option<String> {
        let suffix = self
            .common_path_suffix_unicode
            .as_deref()
            .unwrap_or(&self.common_path_suffix);

        if let Some(local) = &self.local {
            return Some(join_path(local.base_path(), suffix));
        }
        if let Some(network) = &self.network {
            return Some(join_path(network.share_name(), suffix));
        }
        None
    }

    /// Which location structures are present
    pub(crate) fn location_flag(&self) -> LocationFlag {
        match (&self.local, &self.network) {
            (Some(_), Some(_)) => LocationFlag::Both,
            (Some(_), None) => LocationFlag::VolumeIDAndLocalBasePath,
            (None, Some(_)) => LocationFlag::CommonNetworkRelativeLinkAndPathSuffix,
            (None, None) => LocationFlag::None,
        }
    }
}

/// Single byte version of a path. Characters above 0xff become '?'
fn ansi_path(path: &str) -> String {
    path.chars()
        .map(|value| if (value as u32) > 0xff { '?' } else { value })
        .collect()
}

/// Join a base path and suffix with a single separator
fn join_path(base: &str, suffix: &str) -> String {
    if suffix.is_empty() || base.is_empty() {
        return format!("{base}{suffix}");
    }
    if base.ends_with('\\') {
        return format!("{base}{suffix}");
    }
    format!("{base}\\{suffix}")
}

/// Get the data starting at an offset inside `LinkInfo`
fn offset_data(data: &[u8], offset: u32) -> nom::IResult<&[u8], &[u8]> {
    if offset as usize >= data.len() {
        return malformed(data);
    }
    let (start, _) = nom_data(data, offset as u64)?;
    Ok((start, data))
}

/// Offset after a structure inside `LinkInfo`. The structure must end inside `LinkInfo`
fn structure_end(data: &[u8], offset: u32, size: u32) -> nom::IResult<&[u8], usize> {
    match (offset as usize).checked_add(size as usize) {
        Some(end) if end <= data.len() => Ok((data, end)),
        _ => malformed(data),
    }
}

/// Read a string at an offset inside `LinkInfo`. Returns the string and the offset after its end of string character
fn location_string<'a>(
    data: &'a [u8],
    offset: u32,
    encoding: &StringEncoding,
) -> Result<(String, usize), nom::Err<nom::error::Error<&'a [u8]>>> {
    let (string_start, _) = offset_data(data, offset)?;
    let (remaining, value) = nom_null_terminated_string(string_start, encoding)?;
    Ok((value, data.len() - remaining.len()))
}
