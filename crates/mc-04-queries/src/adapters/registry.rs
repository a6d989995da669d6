use crate::ports::PeerSampler;
use mc_02_peer_registry::{PeerProber, PeerRegistry};
use shared_types::Peer;

impl<P: PeerProber> PeerSampler for PeerRegistry<P> {
    fn sample(&self, n: usize) -> Vec<Peer> {
        PeerRegistry::sample(self, n)
    }
}
