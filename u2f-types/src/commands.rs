use bitflags::bitflags;

repr_enum! {
    /// U2F command, determined at the INS position of a request frame.
    ///
    /// Anything between the values `0x40-0xbf` is vendor specific and therefore unsupported.
    Command: u8 {
        /// Value of `0x01` with parameter `P1 = 0x03`
        Register: 0x01,
        /// Value of `0x02` with parameter `P1 = 0x03|0x07`
        Authenticate: 0x02,
        /// Value of `0x03` with parameters of `P1 = 0x00`, `P2 = 0x00`
        Version: 0x03,
    }
}

bitflags! {
    /// Control byte sent in `P1` of Register and Authenticate requests.
    #[repr(transparent)]
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct ControlByte: u8 {
        /// A test of user presence is required, bit 0
        const REQUIRE_PRESENCE = 1 << 0;
        /// A test of user presence is consumed by the operation, bit 1
        const CONSUME_PRESENCE = 1 << 1;
        /// Only check that the key handle is valid for the application, bit 2
        const TEST_ONLY = 1 << 2;

        /// The token MUST verify user presence before signing.
        const ENFORCE = Self::REQUIRE_PRESENCE.bits() | Self::CONSUME_PRESENCE.bits();
        /// The token only checks whether it created the key handle for the application and
        /// answers with `SW_CONDITIONS_NOT_SATISFIED` if it did.
        ///
        /// The wire value is `0x07`, all three bits, not [`ControlByte::TEST_ONLY`] on its own.
        const CHECK_ONLY = Self::ENFORCE.bits() | Self::TEST_ONLY.bits();
    }
}

impl From<ControlByte> for u8 {
    fn from(src: ControlByte) -> Self {
        src.bits()
    }
}
