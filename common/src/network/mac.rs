use pnet::util::MacAddr;
use rand::Rng;

/// Fixed **Organizationally unique identifier** for synthesized addresses.
///
/// `0x02` in the first octet sets the locally-administered bit and clears the
/// multicast bit, so the result never collides with a vendor-assigned address.
pub const LOCAL_OUI: [u8; 3] = [0x02, 0x00, 0x00];

/// Synthesizes a locally administered unicast MAC address for a dummy device.
pub fn random_local_mac<R: Rng + ?Sized>(rng: &mut R) -> MacAddr {
    let [a, b, c] = LOCAL_OUI;
    MacAddr::new(a, b, c, rng.random(), rng.random(), rng.random())
}
