use rmq_topology::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TopologyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cluster = Cluster::new();
    let queue = cluster.add_queue("test.queue")?;
    cluster.add_exchange(("test.topic.exchange", ExchangeType::Topic))?;
    let direct = cluster.add_exchange(("test.direct.exchange", ExchangeType::Direct))?;
    let fanout = cluster.add_exchange(("test.fanout.exchange", ExchangeType::Fanout))?;
    cluster.add_exchange(("test.consistent-hash.exchange", ExchangeType::ConsistentHash))?;

    if let Some(direct) = cluster.exchange(direct).cloned() {
        direct.bind_to(&mut cluster, fanout, BindingOptions::default())?;
        direct.bind_to(&mut cluster, queue, BindingOptions::default().with_routing_key("10"))?;
    }

    println!("{}", cluster.generate_config().to_json_string_pretty()?);
    Ok(())
}
