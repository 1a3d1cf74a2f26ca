use serde::Serialize;

/**  Return a `ShortcutInfo` structure containing the report view of a `Shortcut` file
 * `data_flags`: The `LinkFlags` found in the header
 * `path`: The derived target path. Empty if the target only exists as an ID list outside the filesystem
 * `shellitem_count`: Number of items in the `LinkTargetIDList`
 * `is_abnormal`: Strings larger than the Windows limit or data appended after the terminal block
*/
#[derive(Debug, PartialEq, Serialize)]
pub struct ShortcutInfo {
    pub source_path: String,
    pub data_flags: Vec<DataFlags>,
    pub attribute_flags: Vec<AttributeFlags>,
    pub created: String,
    pub modified: String,
    pub accessed: String,
    pub file_size: u32,
    pub icon_index: i32,
    pub window_style: WindowStyle,
    pub hotkey: String,
    pub location_flags: LocationFlag,
    pub path: String,
    pub drive_serial: String,
    pub drive_type: DriveType,
    pub volume_label: String,
    pub network_provider: NetworkProviderType,
    pub network_share_name: String,
    pub network_device_name: String,
    pub description: String,
    pub relative_path: String,
    pub working_directory: String,
    pub command_line_args: String,
    pub icon_location: String,
    pub shellitem_count: usize,
    pub hostname: String,
    pub droid_volume_id: String,
    pub droid_file_id: String,
    pub birth_droid_volume_id: String,
    pub birth_droid_file_id: String,
    pub environment_variable: String,
    pub icon_environment: String,
    pub codepage: u32,
    pub special_folder_id: u32,
    pub darwin_id: String,
    pub shim_layer: String,
    pub known_folder: String,
    pub property_formats: Vec<String>,
    pub console_face_name: String,
    pub console_font_height: u32,
    pub console_font_family: ConsoleFontFamily,
    pub console_bold: bool,
    pub console_cursor_size: ConsoleCursorSize,
    pub unknown_blocks: Vec<UnknownBlock>,
    pub overlay: String,
    pub is_abnormal: bool,
}

/// Extra data block with a signature we do not interpret. Data is base64 encoded
#[derive(Debug, PartialEq, Serialize)]
pub struct UnknownBlock {
    pub signature: String,
    pub data: String,
}

/// Window state applied when the shortcut target is launched
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize)]
pub enum WindowStyle {
    #[default]
    Normal,
    Maximized,
    MinimizedNoActive,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum NetworkProviderType {
    WnncNetLanman,
    WnncNetAvid,
    WnncNetDocuspace,
    WnncNetMangsoft,
    WnncNetSernet,
    WnncNetRiverFront1,
    WnncNetRiverFront2,
    WnncNetDecorb,
    WnncNetProtstor,
    WnncNetFjRedir,
    WnncNetDistinct,
    WnncNetTwins,
    WnncNetRdr2Sample,
    WnncNetCsc,
    WnncNet3In1,
    WnncNetExtendNet,
    WnncNetStac,
    WnncNetFoxbat,
    WnncNetYahoo,
    WnncNetExifs,
    WnncNetDav,
    WnncNetKnoware,
    WnncNetObjectDire,
    WnncNetMasfax,
    WnncNetHobNfs,
    WnncNetShiva,
    WnncNetIbmal,
    WnncNetLock,
    WnncNetTermsrv,
    WnncNetSrt,
    WnncNetQuincy,
    WnncNetOpenafs,
    WnncNetAvid1,
    WnncNetDfs,
    WnncNetKwnp,
    WnncNetZenworks,
    WnncNetDriveOnWeb,
    WnncNetVmware,
    WnncNetRsfx,
    WnncNetMfiles,
    WnncNetMsNfs,
    WnncNetGoogle,
    Unknown,
    None,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum ConsoleFontFamily {
    DontCare,
    Roman,
    Swiss,
    Modern,
    Script,
    Decorative,
    Unknown,
    None,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum ConsoleCursorSize {
    Small,
    Normal,
    Large,
    Unknown,
    None,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum LocationFlag {
    VolumeIDAndLocalBasePath,
    CommonNetworkRelativeLinkAndPathSuffix,
    Both,
    None,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum DriveType {
    DriveUnknown,
    DriveNotRootDir,
    DriveRemovable,
    DriveFixed,
    DriveRemote,
    DriveCdrom,
    DriveRamdisk,
    None,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum DataFlags {
    HasTargetIdList,
    HasLinkInfo,
    HasName,
    HasRelativePath,
    HasWorkingDirectory,
    HasArguements,
    HasIconLocation,
    IsUnicode,
    ForceNoLinkInfo,
    HasExpString,
    RunInSeparateProcess,
    HasDarwinId,
    RunAsUser,
    HasExpIcon,
    NoPidAlias,
    RunWithShimLayer,
    ForceNoLinkTrack,
    EnableTargetMetadata,
    DisableLinkPathTracking,
    DisableKnownFolderTracking,
    DisableKnownFolderAlias,
    AllowLinkToLink,
    UnaliasOnSave,
    PreferEnvironmentPath,
    KeepLocalDListForUncTarget,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum AttributeFlags {
    ReadOnly,
    Hidden,
    System,
    Directory,
    Archive,
    Device,
    Normal,
    Temporary,
    SparseFile,
    ReparsePoint,
    Compressed,
    Offline,
    NotConentIndexed,
    Encrypted,
    Virtual,
}
