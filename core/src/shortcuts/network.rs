use super::error::EncodeError;
use crate::utils::{
    nom_helper::{malformed, nom_data, nom_null_terminated_string, nom_unsigned_four_bytes},
    strings::StringEncoding,
    writer::ByteWriter,
};
use common::windows::NetworkProviderType;

/// `CommonNetworkRelativeLink` structure of `LinkInfo`. Describes a target on a network share
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct NetworkLink {
    /**ValidDevice (0x1) and ValidNetType (0x2). ValidDevice is kept in sync with `device_name` when written */
    pub flags: u32,
    /**Share name. Ex: \\server\share */
    pub net_name: String,
    /**Mapped drive. Ex: Z: */
    pub device_name: Option<String>,
    pub provider_type: u32,
    pub net_name_unicode: Option<String>,
    pub device_name_unicode: Option<String>,
}

pub(crate) const VALID_DEVICE: u32 = 0x1;
pub(crate) const VALID_NET_TYPE: u32 = 0x2;
/// WNNC_NET_LANMAN. Provider for SMB shares
pub(crate) const NET_LANMAN: u32 = 0x20000;

impl NetworkLink {
    /// Create a network link for a share name. Ex: \\server\share
    pub fn new(net_name: &str) -> NetworkLink {
        NetworkLink {
            flags: VALID_NET_TYPE,
            net_name: net_name.to_string(),
            device_name: None,
            provider_type: NET_LANMAN,
            net_name_unicode: None,
            device_name_unicode: None,
        }
    }

    /// Parse network device metadata from `shortcut` data. Returns the network link and its size
    pub(crate) fn parse_network(data: &[u8]) -> nom::IResult<&[u8], (NetworkLink, u32)> {
        let (_, size) = nom_unsigned_four_bytes(data)?;
        let min_size = 0x14;
        if size < min_size {
            return malformed(data);
        }
        let (remaining, network_data) = nom_data(data, size as u64)?;

        let (input, _size) = nom_unsigned_four_bytes(network_data)?;
        let (input, flags) = nom_unsigned_four_bytes(input)?;
        let (input, name_offset) = nom_unsigned_four_bytes(input)?;
        let (input, device_offset) = nom_unsigned_four_bytes(input)?;
        let (input, provider_type) = nom_unsigned_four_bytes(input)?;

        let mut network = NetworkLink {
            flags,
            net_name: network_string(network_data, name_offset, &StringEncoding::Ansi)?,
            device_name: None,
            provider_type,
            net_name_unicode: None,
            device_name_unicode: None,
        };

        let no_device = 0;
        if flags & VALID_DEVICE == VALID_DEVICE && device_offset != no_device {
            network.device_name = Some(network_string(
                network_data,
                device_offset,
                &StringEncoding::Ansi,
            )?);
        }

        let has_unicode = 0x14;
        if name_offset > has_unicode {
            let (input, name_offset_unicode) = nom_unsigned_four_bytes(input)?;
            let (_, device_offset_unicode) = nom_unsigned_four_bytes(input)?;

            let no_unicode = 0;
            if name_offset_unicode != no_unicode {
                network.net_name_unicode = Some(network_string(
                    network_data,
                    name_offset_unicode,
                    &StringEncoding::Unicode,
                )?);
            }
            if device_offset_unicode != no_unicode {
                network.device_name_unicode = Some(network_string(
                    network_data,
                    device_offset_unicode,
                    &StringEncoding::Unicode,
                )?);
            }
        }

        Ok((remaining, (network, size)))
    }

    /// Create the network link bytes. Strings follow the fixed fields in the order they are declared
    pub(crate) fn network_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let has_unicode = self.net_name_unicode.is_some() || self.device_name_unicode.is_some();
        let header_size = if has_unicode { 0x1c } else { 0x14 };

        let mut strings = ByteWriter::new();
        let name_offset = header_size + strings.len();
        strings.write_null_terminated_string(&self.net_name, &StringEncoding::Ansi)?;

        let mut device_offset = 0;
        if let Some(device) = &self.device_name {
            device_offset = header_size + strings.len();
            strings.write_null_terminated_string(device, &StringEncoding::Ansi)?;
        }

        let mut name_offset_unicode = 0;
        if let Some(name) = &self.net_name_unicode {
            name_offset_unicode = header_size + strings.len();
            strings.write_null_terminated_string(name, &StringEncoding::Unicode)?;
        }
        let mut device_offset_unicode = 0;
        if let Some(device) = &self.device_name_unicode {
            device_offset_unicode = header_size + strings.len();
            strings.write_null_terminated_string(device, &StringEncoding::Unicode)?;
        }

        let flags = if self.device_name.is_some() {
            self.flags | VALID_DEVICE
        } else {
            self.flags & !VALID_DEVICE
        };

        let mut writer = ByteWriter::new();
        writer.write_size(header_size + strings.len())?;
        writer.write_four_bytes(flags)?;
        writer.write_size(name_offset)?;
        writer.write_size(device_offset)?;
        writer.write_four_bytes(self.provider_type)?;
        if has_unicode {
            writer.write_size(name_offset_unicode)?;
            writer.write_size(device_offset_unicode)?;
        }
        writer.write_data(&strings.into_bytes())?;
        Ok(writer.into_bytes())
    }

    /// Share name to use for the target path. UTF16 name is preferred
    pub(crate) fn share_name(&self) -> &str {
        self.net_name_unicode.as_deref().unwrap_or(&self.net_name)
    }
}

/// Read a string at an offset inside the network link
fn network_string<'a>(
    data: &'a [u8],
    offset: u32,
    encoding: &StringEncoding,
) -> Result<String, nom::Err<nom::error::Error<&'a [u8]>>> {
    if offset as usize >= data.len() {
        return malformed(data).map(|(_, value)| value);
    }
    let (string_start, _) = nom_data(data, offset as u64)?;
    let (_, value) = nom_null_terminated_string(string_start, encoding)?;
    Ok(value)
}

/// Get provider type for network device
pub(crate) fn get_provider_type(provider: u32) -> NetworkProviderType {
    match provider {
        0x20000 => NetworkProviderType::WnncNetLanman,
        0x1a0000 => NetworkProviderType::WnncNetAvid,
        0x1b0000 => NetworkProviderType::WnncNetDocuspace,
        0x1c0000 => NetworkProviderType::WnncNetMangsoft,
        0x1d0000 => NetworkProviderType::WnncNetSernet,
        0x1e0000 => NetworkProviderType::WnncNetRiverFront1,
        0x1f0000 => NetworkProviderType::WnncNetRiverFront2,
        0x200000 => NetworkProviderType::WnncNetDecorb,
        0x210000 => NetworkProviderType::WnncNetProtstor,
        0x220000 => NetworkProviderType::WnncNetFjRedir,
        0x230000 => NetworkProviderType::WnncNetDistinct,
        0x240000 => NetworkProviderType::WnncNetTwins,
        0x250000 => NetworkProviderType::WnncNetRdr2Sample,
        0x260000 => NetworkProviderType::WnncNetCsc,
        0x270000 => NetworkProviderType::WnncNet3In1,
        0x290000 => NetworkProviderType::WnncNetExtendNet,
        0x2a0000 => NetworkProviderType::WnncNetStac,
        0x2b0000 => NetworkProviderType::WnncNetFoxbat,
        0x2c0000 => NetworkProviderType::WnncNetYahoo,
        0x2d0000 => NetworkProviderType::WnncNetExifs,
        0x2e0000 => NetworkProviderType::WnncNetDav,
        0x2f0000 => NetworkProviderType::WnncNetKnoware,
        0x300000 => NetworkProviderType::WnncNetObjectDire,
        0x310000 => NetworkProviderType::WnncNetMasfax,
        0x320000 => NetworkProviderType::WnncNetHobNfs,
        0x330000 => NetworkProviderType::WnncNetShiva,
        0x340000 => NetworkProviderType::WnncNetIbmal,
        0x350000 => NetworkProviderType::WnncNetLock,
        0x360000 => NetworkProviderType::WnncNetTermsrv,
        0x370000 => NetworkProviderType::WnncNetSrt,
        0x380000 => NetworkProviderType::WnncNetQuincy,
        0x390000 => NetworkProviderType::WnncNetOpenafs,
        0x3a0000 => NetworkProviderType::WnncNetAvid1,
        0x3b0000 => NetworkProviderType::WnncNetDfs,
        0x3c0000 => NetworkProviderType::WnncNetKwnp,
        0x3d0000 => NetworkProviderType::WnncNetZenworks,
        0x3e0000 => NetworkProviderType::WnncNetDriveOnWeb,
        0x3f0000 => NetworkProviderType::WnncNetVmware,
        0x400000 => NetworkProviderType::WnncNetRsfx,
        0x410000 => NetworkProviderType::WnncNetMfiles,
        0x420000 => NetworkProviderType::WnncNetMsNfs,
        0x430000 => NetworkProviderType::WnncNetGoogle,
        _ => NetworkProviderType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::{get_provider_type, NetworkLink, NET_LANMAN, VALID_NET_TYPE};
    use common::windows::NetworkProviderType;

    #[test]
    fn test_parse_network() {
        let test = [
            43, 0, 0, 0, 3, 0, 0, 0, 20, 0, 0, 0, 40, 0, 0, 0, 0, 0, 37, 0, 92, 92, 86, 66, 111,
            120, 83, 118, 114, 92, 68, 111, 119, 110, 108, 111, 97, 100, 115, 0, 90, 58, 0,
        ];
        let (remaining, (results, size)) = NetworkLink::parse_network(&test).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(size, 43);
        assert_eq!(results.flags, 3);
        assert_eq!(
            get_provider_type(results.provider_type),
            NetworkProviderType::WnncNetRdr2Sample
        );
        assert_eq!(results.net_name, "\\\\VBoxSvr\\Downloads");
        assert_eq!(results.device_name.as_deref(), Some("Z:"));
        assert_eq!(results.net_name_unicode, None);
        assert_eq!(results.device_name_unicode, None);
        assert_eq!(results.share_name(), "\\\\VBoxSvr\\Downloads");

        assert_eq!(results.network_bytes().unwrap(), test);
    }

    #[test]
    fn test_network_unicode() {
        let mut test = NetworkLink::new("\\\\server\\share");
        test.net_name_unicode = Some(String::from("\\\\server\\share"));
        let data = test.network_bytes().unwrap();

        let (_, (result, size)) = NetworkLink::parse_network(&data).unwrap();
        assert_eq!(size as usize, data.len());
        assert_eq!(result, test);
        assert_eq!(result.flags, VALID_NET_TYPE);
        assert_eq!(result.provider_type, NET_LANMAN);
    }

    #[test]
    fn test_parse_bad_network() {
        // Name offset past the end of the structure
        let test = [
            20, 0, 0, 0, 2, 0, 0, 0, 200, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0,
        ];
        let result = NetworkLink::parse_network(&test);
        assert!(matches!(result, Err(nom::Err::Failure(_))));
    }

    #[test]
    fn test_get_provider_type() {
        let test = 0x3f0000;
        let result = get_provider_type(test);
        assert_eq!(result, NetworkProviderType::WnncNetVmware);
    }
}
