repr_enum! {
    /// ISO 7816-4 Status Words (`SW_*`) carried in the last two bytes of every reply.
    ///
    /// Values are taken from <https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html#h3_status-codes>
    StatusWord: u16 {
        /// The command completed successfully without error
        NoError: 0x9000,
        /// The length of the request was invalid.
        WrongLength: 0x6700,
        /// The data in the request was invalid.
        InvalidData: 0x6984,
        /// The request was rejected due to test-of-user-presence being required.
        ConditionsNotSatisfied: 0x6985,
        /// The request was rejected due to an invalid key handle.
        WrongData: 0x6A80,
        /// The Instruction of the request is not supported.
        InsNotSupported: 0x6D00,
        /// The Class byte of the request is not supported. (i.e. CLA != 0)
        ClaNotSupported: 0x6E00,
    }
}

impl StatusWord {
    /// Transform a `StatusWord` to a `u16` as postfix without needing to specify the type.
    pub fn as_primitive(self) -> u16 {
        self.into()
    }
}
